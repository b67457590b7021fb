pub mod compose;
pub mod generate;
pub mod platforms;
pub mod read;
pub mod write;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tagforge_common::config::{Config, DEFAULT_CAPACITY, DEFAULT_POLL_INTERVAL};
use tagforge_common::tag::intent::TargetIntent;
use tagforge_common::tag::platform::Platform;

#[derive(Parser)]
#[command(name = "tagforge")]
#[command(about = "Compose, write and read NFC tags.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Tag image standing in for the reader (a raw NDEF message)
    #[arg(long, global = true, value_name = "PATH")]
    pub tag: Option<PathBuf>,

    /// Tag capacity in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Act as if running outside a secure context
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Less output; repeat for even less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the record an intent produces without touching a tag
    #[command(alias = "c")]
    Compose {
        #[command(subcommand)]
        intent: IntentArgs,
    },
    /// Write a record to the next tag tapped
    #[command(alias = "w")]
    Write {
        #[command(subcommand)]
        intent: IntentArgs,
    },
    /// Read the records of the next tag tapped
    #[command(alias = "r")]
    Read,
    /// Generate short tag text from a prompt
    #[command(alias = "g")]
    Generate {
        prompt: String,
        /// Write the generated text right away
        #[arg(long)]
        write: bool,
    },
    /// List the known social platforms
    #[command(alias = "p")]
    Platforms,
}

#[derive(Subcommand, Clone, Debug)]
pub enum IntentArgs {
    /// Plain text
    Text { content: String },
    /// A link; https:// is added when no scheme is given
    Url { url: String },
    /// A social profile
    Social {
        platform: Platform,
        handle: String,
        /// Prefer the app's native scheme over the web link
        #[arg(long)]
        deep_link: bool,
    },
}

impl From<IntentArgs> for TargetIntent {
    fn from(args: IntentArgs) -> Self {
        match args {
            IntentArgs::Text { content } => TargetIntent::text(content),
            IntentArgs::Url { url } => TargetIntent::url(url),
            IntentArgs::Social {
                platform,
                handle,
                deep_link,
            } => TargetIntent::social(platform, handle, deep_link),
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            tag: self.tag.clone(),
            capacity: self.capacity,
            poll_interval: DEFAULT_POLL_INTERVAL,
            secure_context: !self.insecure,
            quiet: self.quiet,
            api_key: Config::api_key_from_env(),
        }
    }
}
