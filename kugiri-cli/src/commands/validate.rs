//! Validate command implementation

use anyhow::Result;
use clap::Args;
use kugiri_core::RuleSet;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub language_config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating language configuration: {}",
            self.language_config.display()
        );

        match RuleSet::from_file(&self.language_config) {
            Ok(rules) => {
                let stats = rules.stats();
                println!("✓ Configuration is valid!");
                println!("  Language code: {}", rules.code());
                println!("  Language name: {}", rules.name());
                println!("  Terminators: {}", stats.terminators);
                println!("  Enclosure pairs: {}", stats.enclosure_pairs);
                println!("  Abbreviations: {}", stats.abbreviations);
                println!("  Sentence starters: {}", stats.sentence_starters);
                println!("  Continuation words: {}", stats.continuation_words);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
