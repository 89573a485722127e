//! CLI for the Storify client.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storify_core::config::{self, StorifyConfig};
use storify_core::identity::StoryInput;
use storify_core::logging::{LogLevel, LogSink};
use storify_core::story::StoryClient;
use storify_core::transport::CurlTransport;
use storify_core::url_kind::UrlKind;

use commands::{run_check, run_html, run_json, run_metadata, run_url};

/// Top-level CLI for the Storify client.
#[derive(Debug, Parser)]
#[command(name = "storify")]
#[command(about = "Storify client: validate stories, resolve their URLs, fetch content", long_about = None)]
pub struct Cli {
    /// Skip TLS certificate verification (overrides config).
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Log level: debug, info, warning, error, critical, alert (or 100..550).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which story to work on: a canonical URL, or --user with --slug.
#[derive(Debug, Clone, Args)]
pub struct StoryArgs {
    /// Story URL, e.g. https://storify.com/alice/MY-STORY
    #[arg(required_unless_present = "user")]
    pub url: Option<String>,

    /// Story owner.
    #[arg(long, conflicts_with = "url", requires = "slug")]
    pub user: Option<String>,

    /// Story slug.
    #[arg(long, conflicts_with = "url", requires = "user")]
    pub slug: Option<String>,
}

impl StoryArgs {
    pub fn input(&self) -> StoryInput {
        match (&self.url, &self.user, &self.slug) {
            (Some(url), _, _) => StoryInput::from(url.as_str()),
            (None, Some(user), Some(slug)) => StoryInput::pair(user, slug),
            _ => StoryInput::Empty,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check that the story exists.
    Check {
        #[command(flatten)]
        story: StoryArgs,
    },

    /// Print one of the story's URLs.
    Url {
        #[command(flatten)]
        story: StoryArgs,

        /// URL kind: story, create, embed, edit, json, minimal.
        #[arg(long, default_value = "story")]
        kind: UrlKind,
    },

    /// Print the story's metadata as JSON.
    Metadata {
        #[command(flatten)]
        story: StoryArgs,
    },

    /// Print the story's full content document as JSON.
    Json {
        #[command(flatten)]
        story: StoryArgs,
    },

    /// Print the story's minimal HTML rendering.
    Html {
        #[command(flatten)]
        story: StoryArgs,
    },
}

impl Cli {
    /// Defaults plus command-line flags; logging runs on this until the
    /// config file has been read.
    pub fn bootstrap_config(&self) -> StorifyConfig {
        let mut cfg = StorifyConfig::default();
        self.apply_overrides(&mut cfg);
        cfg
    }

    /// Command-line flags win over config file values.
    pub fn apply_overrides(&self, cfg: &mut StorifyConfig) {
        if self.insecure {
            cfg.insecure_tls = true;
        }
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let boot = cli.bootstrap_config();

        // A second subscriber or a broken log file must not stop the command.
        let mut sink = match LogSink::install(boot.log_level, &boot.log_destination()) {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("storify: logging disabled: {e:#}");
                None
            }
        };

        let mut cfg = config::load_or_init()?;
        cli.apply_overrides(&mut cfg);
        if let Some(sink) = sink.as_mut() {
            if sink.level() != cfg.log_level || *sink.destination() != cfg.log_destination() {
                sink.reconfigure(cfg.log_level, &cfg.log_destination());
            }
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let transport = CurlTransport::from_config(&cfg);
        let mut client = StoryClient::new(transport).with_cache(cfg.cache_policy());

        match cli.command {
            CliCommand::Check { story } => run_check(&mut client, story.input())?,
            CliCommand::Url { story, kind } => run_url(&mut client, story.input(), kind)?,
            CliCommand::Metadata { story } => run_metadata(&mut client, story.input())?,
            CliCommand::Json { story } => run_json(&mut client, story.input())?,
            CliCommand::Html { story } => run_html(&mut client, story.input())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
