//! `storify url` – print one of the story's derived URLs.

use anyhow::Result;
use storify_core::identity::StoryInput;
use storify_core::story::StoryClient;
use storify_core::transport::Transport;
use storify_core::url_kind::UrlKind;

pub fn run_url<T: Transport>(
    client: &mut StoryClient<T>,
    input: StoryInput,
    kind: UrlKind,
) -> Result<()> {
    client.set_story(input)?;
    println!("{}", client.url(kind)?);
    Ok(())
}
