//! Process command implementation

use crate::config::CliConfig;
use crate::input::{resolve_sources, InputSource};
use crate::output::{OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use kugiri_core::{Boundary, FallbackPolicy, HtmlConfig, HtmlDocument, RuleSet, Segmenter};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob, `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Language code for sentence detection rules (e.g. en, ja, de-AT) [default: en]
    #[arg(short, long, value_name = "CODE", conflicts_with = "language_config")]
    pub language: Option<String>,

    /// External language configuration file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Language to use when the requested one is not supported
    #[arg(long, value_name = "CODE")]
    pub fallback: Option<String>,

    /// Treat inputs as HTML and segment their visible text
    #[arg(long)]
    pub html: bool,

    /// Write the HTML inputs back with each sentence wrapped in `<mark data-sent="N">`
    #[arg(long, requires = "html")]
    pub marks: bool,

    /// Comma-separated elements whose content is skipped in HTML mode
    #[arg(long, value_name = "TAGS", value_delimiter = ',', requires = "html")]
    pub html_exclude: Option<Vec<String>>,

    /// Segment inputs in parallel regardless of their number
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads for parallel processing
    #[arg(short = 't', long, value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// A document read into memory
struct Document {
    label: String,
    text: String,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let segmenter = self.build_segmenter(&config)?;
        let format = self.output_format(&config)?;
        let sources = resolve_sources(&self.input)?;
        log::info!(
            "Processing {} input(s) with '{}' rules",
            sources.len(),
            segmenter.rules().code()
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(sources.len() as u64);

        let parallel =
            self.parallel || sources.len() >= config.performance.parallel_threshold_files;
        let threads = self.threads.unwrap_or(config.performance.worker_threads);

        let pool = if parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to start worker threads")?;
            Some(pool)
        } else {
            None
        };

        let documents = run_stage(pool.as_ref(), &sources, |source| {
            read_document(source, &progress)
        })
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

        let pages = if self.html {
            let exclude = self.html_exclude();
            run_stage(pool.as_ref(), &documents, |doc| {
                HtmlDocument::parse(&doc.text, &exclude)
            })
            .into_iter()
            .collect::<kugiri_core::Result<Vec<_>>>()?
        } else {
            Vec::new()
        };
        let texts: Vec<&str> = if self.html {
            pages.iter().map(HtmlDocument::text).collect()
        } else {
            documents.iter().map(|doc| doc.text.as_str()).collect()
        };

        let segmented: Vec<Vec<Boundary<'_>>> =
            run_stage(pool.as_ref(), &texts, |text| segmenter.boundaries(text));
        progress.finish();

        let total = if self.marks {
            self.write_marked(&documents, &pages, &segmented)?
        } else {
            self.write_sentences(format, &config, &documents, &segmented)?
        };

        log::info!("Wrote {total} sentence(s)");
        Ok(())
    }

    fn build_segmenter(&self, config: &CliConfig) -> Result<Segmenter> {
        if let Some(path) = self
            .language_config
            .as_ref()
            .or(config.processing.language_config.as_ref())
        {
            let rules = RuleSet::from_file(path).with_context(|| {
                format!("Failed to load language configuration: {}", path.display())
            })?;
            log::info!(
                "Using external rules '{}' from {}",
                rules.code(),
                path.display()
            );
            return Ok(Segmenter::with_rules(rules));
        }

        let language = self
            .language
            .as_deref()
            .unwrap_or(config.processing.default_language.as_str());
        let fallback = match self
            .fallback
            .as_ref()
            .or(config.processing.fallback_language.as_ref())
        {
            Some(code) => FallbackPolicy::Default(code.clone()),
            None => FallbackPolicy::Strict,
        };

        let segmenter = Segmenter::builder()
            .language(language)
            .fallback(fallback)
            .build()?;
        if segmenter.rules().code() != language {
            log::info!(
                "Language '{}' resolved to '{}'",
                language,
                segmenter.rules().code()
            );
        }
        Ok(segmenter)
    }

    fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
                crate::CliError::ConfigError(format!(
                    "unknown output format '{}'",
                    config.output.default_format
                ))
                .into()
            }),
        }
    }

    fn html_exclude(&self) -> Vec<String> {
        match &self.html_exclude {
            Some(tags) => tags
                .iter()
                .map(|tag| tag.trim().to_ascii_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
            None => HtmlConfig::default().exclude_elements,
        }
    }

    fn open_writer(&self) -> Result<Box<dyn Write + Send + Sync>> {
        Ok(match &self.output {
            Some(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        })
    }

    fn write_sentences(
        &self,
        format: OutputFormat,
        config: &CliConfig,
        documents: &[Document],
        segmented: &[Vec<Boundary<'_>>],
    ) -> Result<usize> {
        let mut formatter: Box<dyn OutputFormatter> =
            format.formatter(self.open_writer()?, config.output.pretty_json);
        let label_sources = documents.len() > 1;
        let mut total = 0;
        for (doc, boundaries) in documents.iter().zip(segmented) {
            log::debug!("{}: {} sentence(s)", doc.label, boundaries.len());
            let source = label_sources.then_some(doc.label.as_str());
            for boundary in boundaries {
                formatter.format_sentence(boundary, source)?;
            }
            total += boundaries.len();
        }
        formatter.finish()?;
        Ok(total)
    }

    fn write_marked(
        &self,
        documents: &[Document],
        pages: &[HtmlDocument<'_>],
        segmented: &[Vec<Boundary<'_>>],
    ) -> Result<usize> {
        let mut writer = self.open_writer()?;
        let label_sources = documents.len() > 1;
        let mut total = 0;
        for ((doc, page), boundaries) in documents.iter().zip(pages).zip(segmented) {
            let sentences = page.sentences(boundaries);
            log::debug!("{}: {} sentence(s)", doc.label, sentences.len());
            if label_sources {
                writeln!(writer, "<!-- {} -->", doc.label)?;
            }
            writeln!(writer, "{}", page.mark(&sentences))?;
            total += sentences.len();
        }
        writer.flush()?;
        Ok(total)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run from tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Apply `stage` to every item, on the worker pool when there is one
fn run_stage<'a, T, R, F>(pool: Option<&ThreadPool>, items: &'a [T], stage: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&'a T) -> R + Sync + Send,
{
    match pool {
        Some(pool) => pool.install(|| items.par_iter().map(&stage).collect()),
        None => items.iter().map(&stage).collect(),
    }
}

fn read_document(source: &InputSource, progress: &ProgressReporter) -> Result<Document> {
    let label = source.label();
    let text = source.read()?;
    log::debug!("Read {} ({} bytes)", label, text.len());
    progress.file_completed(&label);
    Ok(Document { label, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: Vec<String>) -> ProcessArgs {
        ProcessArgs {
            input,
            output: None,
            format: None,
            language: None,
            language_config: None,
            fallback: None,
            html: false,
            marks: false,
            html_exclude: None,
            parallel: false,
            threads: None,
            config: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_language_defaults_to_config() {
        let mut config = CliConfig::default();
        config.processing.default_language = "ja".to_string();

        let segmenter = args(vec![]).build_segmenter(&config).unwrap();
        assert_eq!(segmenter.rules().code(), "ja");
    }

    #[test]
    fn test_flag_overrides_config_language() {
        let mut process = args(vec![]);
        process.language = Some("de-AT".to_string());

        let segmenter = process.build_segmenter(&CliConfig::default()).unwrap();
        assert_eq!(segmenter.rules().code(), "de");
    }

    #[test]
    fn test_unsupported_language_needs_fallback() {
        let mut process = args(vec![]);
        process.language = Some("tlh".to_string());
        let err = process.build_segmenter(&CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("tlh"));

        process.fallback = Some("en".to_string());
        let segmenter = process.build_segmenter(&CliConfig::default()).unwrap();
        assert_eq!(segmenter.rules().code(), "en");
    }

    #[test]
    fn test_unknown_configured_format() {
        let mut config = CliConfig::default();
        config.output.default_format = "yaml".to_string();
        assert!(args(vec![]).output_format(&config).is_err());

        config.output.default_format = "Markdown".to_string();
        assert_eq!(
            args(vec![]).output_format(&config).unwrap(),
            OutputFormat::Markdown
        );
    }

    #[test]
    fn test_execute_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.txt");
        let output = temp_dir.path().join("out.json");
        fs::write(&input, "Dr. Smith arrived. He left.").unwrap();

        let mut process = args(vec![input.display().to_string()]);
        process.output = Some(output.clone());
        process.format = Some(OutputFormat::Json);
        process.parallel = true;
        process.threads = Some(2);
        process.execute().unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value[0]["text"], "Dr. Smith arrived.");
        assert_eq!(value[1]["text"], "He left.");
    }

    #[test]
    fn test_stages_run_on_the_worker_pool() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap();
        let items = [1, 2, 3, 4];
        let on_pool = run_stage(Some(&pool), &items, |_| rayon::current_thread_index());
        assert!(on_pool.iter().all(|index| matches!(index, Some(i) if *i < 2)));

        let serial = run_stage(None, &items, |n| n * 2);
        assert_eq!(serial, vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_html_exclude_normalizes_tags() {
        let mut process = args(vec![]);
        assert_eq!(
            process.html_exclude(),
            HtmlConfig::default().exclude_elements
        );

        process.html_exclude = Some(vec![" Aside".to_string(), String::new(), "NAV".to_string()]);
        assert_eq!(process.html_exclude(), vec!["aside", "nav"]);
    }

    #[test]
    fn test_execute_marks_html() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("page.html");
        let output = temp_dir.path().join("page.marked.html");
        fs::write(&input, "<p>One. <b>Two</b> more.</p>").unwrap();

        let mut process = args(vec![input.display().to_string()]);
        process.output = Some(output.clone());
        process.html = true;
        process.marks = true;
        process.parallel = true;
        process.execute().unwrap();

        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "<p><mark data-sent=\"0\">One.</mark> <b><mark data-sent=\"1\">Two</mark></b> \
             <mark data-sent=\"1\">more.</mark></p>\n"
        );
    }
}
