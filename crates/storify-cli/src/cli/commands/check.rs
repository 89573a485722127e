//! `storify check` – validate a story against the service.

use anyhow::{Context, Result};
use storify_core::identity::StoryInput;
use storify_core::story::StoryClient;
use storify_core::transport::Transport;

pub fn run_check<T: Transport>(client: &mut StoryClient<T>, input: StoryInput) -> Result<()> {
    client
        .set_story(input)
        .context("story not found or identifier malformed")?;
    let identity = client.identity();
    println!("valid: {}/{}", identity.user, identity.slug);
    Ok(())
}
