use anyhow::{Context, Result};
use clap::Parser;
use i18n_extract::{ExtractConfig, ExtractOutcome, ExtractQuery, Extractor, Notifier};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// i18n Extract - Move hard-coded view text into the locale dictionary
#[derive(Parser, Debug)]
#[command(name = "i18n-extract")]
#[command(author, version, about, long_about = None)]
#[command(help_template = "{name} {version}\n{about}\n\nUSAGE:\n    {usage}\n\n{all-args}")]
struct Cli {
    /// Selected text to extract (quotes and surrounding whitespace are stripped)
    #[arg(value_name = "TEXT")]
    text: String,

    /// Source file the text was selected in
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Project root (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Key to use instead of the suggestion
    #[arg(short, long, conflicts_with = "yes")]
    key: Option<String>,

    /// Accept the suggested key without prompting
    #[arg(short, long)]
    yes: bool,

    /// Show the namespace and suggested key without writing anything
    #[arg(long, conflicts_with = "in_place")]
    dry_run: bool,

    /// Replace the selected text in the source file with the reference
    #[arg(long)]
    in_place: bool,

    /// Print only the reference expression
    #[arg(long)]
    simple: bool,

    /// Extract from files whose extension is not configured
    #[arg(long)]
    any_file: bool,

    /// Configuration file (defaults to <root>/.i18n-extract.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "i18n_extract=warn",
        1 => "i18n_extract=info",
        _ => "i18n_extract=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match &cli.root {
        Some(root) => resolve_path(root)?,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let config = load_config(&root, cli.config.as_deref())?;

    let file = if cli.file.is_absolute() {
        resolve_path(&cli.file)?
    } else {
        resolve_path(&root.join(&cli.file))?
    };

    if !cli.any_file && !config.accepts_file(&file) {
        anyhow::bail!(
            "{} is not a {} file\n\nTip: pass --any-file or set file_extensions in .i18n-extract.toml",
            file.display(),
            config.file_extensions.join("/")
        );
    }

    let notifier = if cli.simple {
        Notifier::simple()
    } else {
        Notifier::new()
    };
    let query = ExtractQuery::new(cli.text.clone(), file.clone());
    let mut extractor = Extractor::new(&root, config);

    if cli.dry_run {
        match extractor.preview(&query) {
            Ok(preview) => print!("{}", notifier.format_preview(&preview)),
            Err(reason) => print!("{}", notifier.format(&ExtractOutcome::Cancelled(reason))),
        }
        return Ok(());
    }

    let fixed_key = cli.key.clone();
    let accept = cli.yes;
    let mut prompt = |suggested: &str, text: &str| -> Option<String> {
        if let Some(key) = &fixed_key {
            return Some(key.clone());
        }
        if accept {
            return Some(suggested.to_string());
        }
        ask_for_key(suggested, text)
    };

    let outcome = extractor.extract(&query, &mut prompt);
    print!("{}", notifier.format(&outcome));

    if let ExtractOutcome::Extracted(extraction) = &outcome {
        if cli.in_place {
            let replaced = i18n_extract::source::replace_selection(&file, &cli.text, &extraction.reference)
                .with_context(|| format!("Failed to rewrite {}", file.display()))?;
            if !replaced {
                tracing::warn!("selected text not found in {}", file.display());
            }
        }
    }

    Ok(())
}

/// Absolute form of `path`, with symlinks resolved when the path exists so
/// that the root and the file share a prefix.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(_) => std::path::absolute(path)
            .with_context(|| format!("Failed to resolve {}", path.display())),
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ExtractConfig> {
    let config = match explicit {
        Some(path) => ExtractConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ExtractConfig::load(root)?,
    };
    Ok(config)
}

/// Interactive key prompt, pre-filled with the suggestion. Without a
/// terminal there is nobody to ask, so the extraction is cancelled.
fn ask_for_key(suggested: &str, text: &str) -> Option<String> {
    if !std::io::stdin().is_terminal() {
        return None;
    }
    eprintln!("Extracting: {}", text);
    dialoguer::Input::<String>::new()
        .with_prompt("Enter the i18n key name")
        .default(suggested.to_string())
        .interact_text()
        .ok()
}
