//! Parse response header lines collected during a GET.

/// Headers worth reporting for a fetched document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHeaders {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// Later values win, so after redirects the final response is what remains.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut out = ResponseHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                out.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                out.content_length = value.parse::<u64>().ok();
            }
        }
    }

    out
}
