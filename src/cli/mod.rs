use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "postscribe",
    about = "Postscribe - Turn YouTube video transcripts into social media posts with Gemini",
    version,
    long_about = "A CLI tool that fetches the caption transcript of a YouTube video and uses \
Google's Gemini API to write a short post for LinkedIn, Instagram, Facebook, or Twitter(X)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a post from a YouTube video in one shot
    Generate {
        /// YouTube video ID (e.g. VJgdOMXhEj0)
        #[arg(value_name = "VIDEO_ID")]
        video_id: String,

        /// Target platform for the post
        #[arg(short, long, value_enum, default_value = "linkedin")]
        platform: Platform,

        /// What the post should focus on (e.g. "Summarize the key takeaways")
        #[arg(short = 'Q', long)]
        query: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Total generation attempts before giving up
        #[arg(long, value_name = "COUNT")]
        retries: Option<u32>,

        /// Seconds to wait between failed attempts
        #[arg(long, value_name = "SECONDS")]
        delay: Option<u64>,
    },

    /// Run the interactive form (video id, platform, query)
    Interactive,

    /// List supported platforms
    Platforms,

    /// Show or set up configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

/// Social platforms the interactive form offers. The generator itself
/// accepts any platform name as free text.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Linkedin,
    Instagram,
    Facebook,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Linkedin,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Twitter,
    ];

    /// Human-readable name used in prompts and output filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linkedin => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Twitter => "Twitter(X)",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
