use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use page_loader_core::load::{LoadOptions, LoadProgressCallback, PageRequest, load_page};
use page_loader_core::report::{ReportFormat, generate_json_report, generate_load_report};
use page_loader_scanner::client::DEFAULT_USER_AGENT;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Expand `~` in the output directory argument
pub fn resolve_output_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn page_request_from_matches(matches: &ArgMatches) -> Result<PageRequest> {
    let source_url = matches
        .get_one::<Url>("url")
        .cloned()
        .context("A URL to download is required")?;
    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or(".");

    Ok(PageRequest {
        source_url,
        output_dir: resolve_output_dir(output),
    })
}

pub fn load_options_from_matches(matches: &ArgMatches) -> LoadOptions {
    let quiet = matches.get_flag("quiet");

    LoadOptions {
        timeout_secs: *matches.get_one::<u64>("timeout").unwrap_or(&10),
        max_concurrency: matches.get_one::<usize>("concurrency").copied(),
        user_agent: DEFAULT_USER_AGENT.to_string(),
        show_progress_bars: !quiet,
    }
}

pub fn report_format_from_matches(matches: &ArgMatches) -> ReportFormat {
    matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

/// Log to stderr, honouring `RUST_LOG` unless `--verbose` asks for debug output.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn handle_load(matches: &ArgMatches) -> Result<PathBuf> {
    let request = page_request_from_matches(matches)?;
    let options = load_options_from_matches(matches);
    let format = report_format_from_matches(matches);
    let quiet = matches.get_flag("quiet");
    debug!(
        "Saving {} into {}",
        request.source_url,
        request.output_dir.display()
    );

    let progress_callback: Option<LoadProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            eprintln!("{} {}", "→".blue(), msg);
        }))
    };

    let report = load_page(&request, &options, progress_callback)
        .await
        .with_context(|| format!("Failed to download {}", request.source_url))?;

    println!("{}", report.page_path.display());

    if !quiet {
        match format {
            ReportFormat::Json => {
                let json = generate_json_report(&report).context("Failed to serialize report")?;
                println!("{}", json);
            }
            ReportFormat::Text => {
                eprint!("{}", generate_load_report(&report));
                if report.failed() > 0 {
                    eprintln!(
                        "{} {} resource(s) could not be downloaded",
                        "⚠".yellow().bold(),
                        report.failed()
                    );
                } else {
                    eprintln!("{} Page saved", "✓".green().bold());
                }
            }
        }
    }

    Ok(report.page_path)
}
