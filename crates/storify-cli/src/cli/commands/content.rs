//! `storify metadata|json|html` – fetch story content.

use anyhow::Result;
use storify_core::identity::StoryInput;
use storify_core::story::StoryClient;
use storify_core::transport::Transport;

pub fn run_metadata<T: Transport>(client: &mut StoryClient<T>, input: StoryInput) -> Result<()> {
    client.set_story(input)?;
    let meta = client.fetch_metadata()?;
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}

pub fn run_json<T: Transport>(client: &mut StoryClient<T>, input: StoryInput) -> Result<()> {
    client.set_story(input)?;
    let content = client.fetch_json()?;
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

pub fn run_html<T: Transport>(client: &mut StoryClient<T>, input: StoryInput) -> Result<()> {
    client.set_story(input)?;
    print!("{}", client.fetch_html()?);
    Ok(())
}
