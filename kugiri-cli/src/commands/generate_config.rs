//! Generate configuration template command

use anyhow::{bail, Context, Result};
use clap::Args;
use kugiri_core::{LanguageConfig, RuleSet};
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Language code for the new configuration
    #[arg(short, long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Display name for the language
    #[arg(short, long, value_name = "NAME", default_value = "Custom Language")]
    pub name: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        let template = LanguageConfig::template(&self.language_code, &self.name);
        RuleSet::from_toml_str(&template)
            .with_context(|| format!("Cannot generate a template for '{}'", self.language_code))?;

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!("  Output: {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("  1. Edit the word lists for your language");
        println!(
            "  2. Validate: kugiri validate -c {}",
            self.output.display()
        );
        println!(
            "  3. Use it: kugiri process -i <FILE> --language-config {}",
            self.output.display()
        );

        Ok(())
    }
}
