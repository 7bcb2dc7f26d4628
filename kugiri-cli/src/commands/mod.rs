//! CLI command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};

use crate::output::OutputFormat;

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text files into sentences
    Process(process::ProcessArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a language configuration file
    Validate(validate::ValidateArgs),

    /// Generate a language configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in languages
    Languages,

    /// List available output formats
    Formats,
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

impl ListCommands {
    pub fn execute(&self) -> Result<()> {
        println!("{}", self.render());
        Ok(())
    }

    fn render(&self) -> String {
        match self {
            ListCommands::Languages => {
                let mut lines = vec!["Available languages:".to_string()];
                lines.extend(
                    kugiri_core::supported_languages()
                        .into_iter()
                        .map(|info| format!("  {:<4} {}", info.code, info.name)),
                );
                lines.join("\n")
            }
            ListCommands::Formats => {
                let mut lines = vec!["Available output formats:".to_string()];
                lines.extend(OutputFormat::value_variants().iter().filter_map(|format| {
                    let value = format.to_possible_value()?;
                    let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                    Some(format!("  {:<9} {}", value.get_name(), help))
                }));
                lines.join("\n")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Languages,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Languages"));
    }

    #[test]
    fn test_list_languages() {
        let output = ListCommands::Languages.render();
        assert!(output.starts_with("Available languages:"));
        assert!(output.contains("  en   English"));
        assert!(output.contains("  ja   Japanese"));
        assert_eq!(output.lines().count(), 1 + kugiri_core::supported_languages().len());
    }

    #[test]
    fn test_list_formats() {
        let output = ListCommands::Formats.render();
        for name in ["text", "json", "markdown"] {
            assert!(output.contains(name), "{name}");
        }
        assert!(output.contains("Markdown numbered list"));
    }
}
