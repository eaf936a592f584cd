use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `pitch-cleanup` - Reformat raw JSON project pitches into Markdown.
#[derive(Parser, Debug)]
#[command(name = "pitch-cleanup")]
#[command(version)]
#[command(about = "Turn a raw JSON pitch into polished Markdown with an LLM.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.pitch-cleanup/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (prompts and timings)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reformat a pitch JSON file into draft and final Markdown
    Cleanup {
        /// Pitch JSON file (object of section titles to content)
        input: PathBuf,

        /// Write the full record (reply, metadata, prompts) as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the final Markdown to this file
        #[arg(long)]
        markdown: Option<PathBuf>,

        /// Provider to use (ollama, openai, openrouter, groq, lmstudio)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Temperature (0.0 - 2.0)
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Override the provider endpoint
        #[arg(long)]
        base_url: Option<String>,

        /// API key (otherwise resolved from config and environment)
        #[arg(long)]
        api_key: Option<String>,

        /// Replace the built-in formatting instructions with this file
        #[arg(long)]
        system_prompt_file: Option<PathBuf>,

        /// Leave metadata out of the printed JSON
        #[arg(long)]
        no_metadata: bool,

        /// Include the system prompt in the printed JSON
        #[arg(long)]
        with_system_prompt: bool,

        /// Include the user prompt in the printed JSON
        #[arg(long)]
        with_user_prompt: bool,
    },

    /// List supported providers
    Providers,

    /// Show the resolved configuration
    Status,
}
