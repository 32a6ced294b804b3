pub mod toml_config;

pub use toml_config::ShopConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "parts-shop")]
#[command(about = "Edit a computer parts list and save it as CSV, text, JSON or PDF")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log line format (written to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive table editor (default)
    Shell {
        /// File to load before the first prompt
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Load one file and save its parts in the format of another
    Convert {
        /// Source file (.csv, .txt or .json)
        input: PathBuf,

        /// Destination file (.csv, .txt, .json or .pdf)
        output: PathBuf,
    },
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_shell() {
        let config = CliConfig::parse_from(["parts-shop"]);
        assert!(config.command.is_none());
        assert!(!config.verbose);
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_convert_arguments() {
        let config = CliConfig::parse_from([
            "parts-shop",
            "--verbose",
            "--log-format",
            "json",
            "convert",
            "stock.csv",
            "stock.pdf",
        ]);

        assert!(config.verbose);
        assert_eq!(config.log_format, LogFormat::Json);
        match config.command {
            Some(Command::Convert { input, output }) => {
                assert_eq!(input, PathBuf::from("stock.csv"));
                assert_eq!(output, PathBuf::from("stock.pdf"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
