use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::client::Locale;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the translation gateway
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Submit one audio file to the gateway and print the result
    Submit {
        /// Audio file (MP3, M4A, WAV, CAF)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Target language code; defaults to the UI locale
        #[arg(short, long)]
        target: Option<String>,

        /// UI locale for messages (en, de, pl)
        #[arg(short, long, default_value = "en")]
        locale: Locale,

        /// Gateway endpoint (overrides config)
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}
