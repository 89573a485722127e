pub mod config;
pub mod logging;

pub mod cache;
pub mod error;
pub mod identity;
pub mod story;
pub mod transport;
pub mod url_kind;
