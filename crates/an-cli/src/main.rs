mod config;
mod confirm;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use an_core::CommentStyle;
use an_engine::{
    annotate_directory, annotate_file, clear_directory, clear_file, AlwaysConfirm, AnnotateOptions, BatchReport,
    Confirm, FileReport,
};
use an_llm::{build_provider, ProviderKind};
use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{config_path, Config};
use crate::confirm::TerminalConfirm;

#[derive(Parser)]
#[command(
    name = "annotr",
    version,
    about = "Generate code comments with an LLM",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// File or directory to annotate
    path: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Process every file of a directory without asking
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Comment style: line, block or doc
    #[arg(long, global = true)]
    style: Option<String>,

    /// Model to use instead of the configured one
    #[arg(long, global = true)]
    model: Option<String>,

    /// Print results instead of writing files
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Remove comments from a file or directory
    Clear {
        path: PathBuf,
    },
    /// Write the configuration file
    Init {
        /// ollama, anthropic, openai or groq (inferred from the key if omitted)
        #[arg(long)]
        provider: Option<String>,

        #[arg(long, env = "ANNOTR_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_log::LogTracer::init();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Some(Command::Clear { path }) => run_clear(cli, path),
        Some(Command::Init { provider, api_key }) => run_init(cli, provider.as_deref(), api_key.as_deref()),
        None => match &cli.path {
            Some(path) => run_annotate(cli, path),
            None => {
                Cli::command().print_help()?;
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(TerminalConfirm::stdin())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn is_dir(path: &Path) -> Result<bool> {
    let meta = fs::metadata(path).with_context(|| format!("failed to access {}", path.display()))?;
    Ok(meta.is_dir())
}

fn run_annotate(cli: &Cli, path: &Path) -> Result<ExitCode> {
    let Some(config) = Config::load()? else {
        println!("No configuration found. Run 'annotr init' first.");
        return Ok(ExitCode::FAILURE);
    };

    let kind = ProviderKind::from_name(&config.default_provider)?;
    let model = cli.model.as_deref().unwrap_or(&config.default_model);
    let provider = build_provider(kind, config.api_key(kind.name()), model, config.endpoint.as_deref())
        .with_context(|| format!("cannot use provider {kind}"))?;

    let options = AnnotateOptions {
        style: cli
            .style
            .as_deref()
            .map(CommentStyle::from_name)
            .unwrap_or(config.comment_style),
        context_lines: config.context_lines,
        max_tokens: config.max_tokens,
        dry_run: cli.dry_run,
    };
    tracing::info!(provider = %kind, model, style = %options.style, "annotating");

    if is_dir(path)? {
        let mut confirm = confirmer(cli.yes);
        let report = annotate_directory(path, provider.as_ref(), &options, confirm.as_mut());
        print_batch(&report, cli.dry_run);
        if report.files_total > 0 {
            println!("Done! Commented {} of {} files.", report.files_processed, report.files_total);
            println!(
                "{} comments added, {} units already commented, {} failed.",
                report.units_inserted, report.units_skipped, report.units_failed
            );
        }
        return Ok(exit_code(&report));
    }

    println!("Processing {}...", file_name(path));
    let report = annotate_file(path, provider.as_ref(), &options)?;
    if report.units_found == 0 {
        println!("No commentable code blocks found.");
        return Ok(ExitCode::SUCCESS);
    }
    print_preview(&report);
    println!("✓ Added {} comments", report.inserted);
    if report.skipped_existing > 0 {
        println!("  {} already commented", report.skipped_existing);
    }
    if report.failed > 0 {
        println!("  {} could not be generated (run with -v for details)", report.failed);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_clear(cli: &Cli, path: &Path) -> Result<ExitCode> {
    if is_dir(path)? {
        let mut confirm = confirmer(cli.yes);
        let report = clear_directory(path, cli.dry_run, confirm.as_mut());
        print_batch(&report, cli.dry_run);
        if report.files_total > 0 {
            println!(
                "Done! Cleared comments from {} of {} files ({} comment blocks removed).",
                report.files_processed, report.files_total, report.comments_removed
            );
        }
        return Ok(exit_code(&report));
    }

    println!("Clearing comments from {}...", file_name(path));
    let report = clear_file(path, cli.dry_run)?;
    print_preview(&report);
    println!("✓ Removed {} comment blocks", report.removed);
    Ok(ExitCode::SUCCESS)
}

fn run_init(cli: &Cli, provider: Option<&str>, api_key: Option<&str>) -> Result<ExitCode> {
    let path = config_path()?;
    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        println!("Delete it first if you want to reconfigure.");
        return Ok(ExitCode::FAILURE);
    }

    let api_key = api_key.map(str::trim).filter(|k| !k.is_empty());
    let kind = match (provider, api_key) {
        (Some(name), _) => ProviderKind::from_name(name)?,
        (None, Some(key)) => match ProviderKind::from_api_key(key) {
            Some(kind) => kind,
            None => bail!("could not tell the provider from the API key; pass --provider"),
        },
        (None, None) => ProviderKind::Ollama,
    };

    let mut config = Config {
        default_provider: kind.name().to_string(),
        default_model: cli.model.clone().unwrap_or_else(|| kind.default_model().to_string()),
        ..Config::default()
    };
    if let Some(style) = &cli.style {
        config.comment_style = CommentStyle::from_name(style);
    }

    if kind.requires_api_key() {
        let Some(key) = api_key else {
            bail!("{kind} needs an API key; pass --api-key or set ANNOTR_API_KEY");
        };
        kind.validate_api_key(key)?;
        config.api_keys.insert(kind.name().to_string(), key.to_string());
    }

    let saved = config.save()?;
    println!("Configuration saved to {}", saved.display());
    println!("Provider: {kind}, model: {}, style: {}", config.default_model, config.comment_style);
    Ok(ExitCode::SUCCESS)
}

fn print_preview(report: &FileReport) {
    if let Some(content) = &report.preview {
        println!("==> {} <==", report.path.display());
        println!("{content}");
    }
}

fn print_batch(report: &BatchReport, dry_run: bool) {
    if report.files_total == 0 {
        println!("No supported files found in directory.");
        return;
    }
    if dry_run {
        report.files.iter().for_each(print_preview);
    }
    for (path, error) in &report.failed_details {
        eprintln!("Error processing {path}: {error}");
    }
}

fn exit_code(report: &BatchReport) -> ExitCode {
    if report.files_failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
