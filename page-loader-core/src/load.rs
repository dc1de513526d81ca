use indicatif::{ProgressBar, ProgressStyle};
use page_loader_scanner::client::{ClientConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use page_loader_scanner::error::{Result, ScanError};
use page_loader_scanner::naming::{NamingContext, page_file_name};
use page_loader_scanner::{FetchOutcome, HttpClient, ResourceFetcher, transform};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tracing::{info, warn};
use url::Url;

/// Suffix of the page file while it is being written.
pub const TEMP_SUFFIX: &str = ".part";

/// What to save and where
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub source_url: Url,
    pub output_dir: PathBuf,
}

/// Options for configuring a page load
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub timeout_secs: u64,
    /// Upper bound on simultaneous resource downloads; `None` fetches all at once.
    pub max_concurrency: Option<usize>,
    pub user_agent: String,
    pub show_progress_bars: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrency: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting load progress
pub type LoadProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Summary of a finished load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub page_url: String,
    /// Absolute path of the saved page.
    pub page_path: PathBuf,
    /// Set only when the page had local resources.
    pub resource_dir: Option<PathBuf>,
    pub outcomes: Vec<FetchOutcome>,
    pub elapsed_ms: u64,
}

impl LoadReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }
}

/// Save a page and its local resources.
///
/// Fetching the page, parsing it and writing the page file are fatal steps and
/// run strictly in that order. Resource downloads run afterwards as one
/// concurrent batch whose individual failures only show up in the report.
pub async fn load_page(
    request: &PageRequest,
    options: &LoadOptions,
    progress_callback: Option<LoadProgressCallback>,
) -> Result<LoadReport> {
    let start = Instant::now();
    let page_url = &request.source_url;

    let client = HttpClient::with_config(&ClientConfig {
        user_agent: options.user_agent.clone(),
        timeout_secs: options.timeout_secs,
        ..ClientConfig::default()
    })?;

    notify(&progress_callback, format!("Fetching {}", page_url));
    let document = client.fetch_text(page_url.as_str()).await?;
    info!("Fetched {} ({} bytes)", page_url, document.len());

    let naming = NamingContext::from_page_url(page_url);
    let transformed = transform(&document, page_url, &naming)?;

    let page_path = write_page_file(&request.output_dir, &page_file_name(page_url), &transformed.html).await?;
    info!("Saved page to {}", page_path.display());
    notify(&progress_callback, format!("Saved page to {}", page_path.display()));

    let resource_count = transformed.resources.len();
    let progress_bar = if options.show_progress_bars && resource_count > 0 {
        Some(resource_progress_bar(resource_count))
    } else {
        None
    };

    let mut fetcher = ResourceFetcher::new(client);
    if let Some(limit) = options.max_concurrency {
        fetcher = fetcher.with_max_concurrency(limit);
    }
    if let Some(ref pb) = progress_bar {
        let pb = pb.clone();
        fetcher = fetcher.with_outcome_callback(Arc::new(move |outcome: &FetchOutcome| {
            pb.set_message(outcome.reference.original_url.clone());
            pb.inc(1);
        }));
    }

    if resource_count > 0 {
        notify(&progress_callback, format!("Downloading {} resources", resource_count));
    }
    let outcomes = fetcher
        .fetch_all(&transformed.resources, page_url, &naming, &request.output_dir)
        .await?;

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    let failed = outcomes.iter().filter(|o| !o.success).count();
    if failed > 0 {
        warn!("{} of {} resources could not be downloaded", failed, outcomes.len());
    }

    let resource_dir = if outcomes.is_empty() {
        None
    } else {
        Some(absolute(&request.output_dir.join(&naming.resource_dir_name))?)
    };

    Ok(LoadReport {
        page_url: page_url.to_string(),
        page_path,
        resource_dir,
        outcomes,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}

/// Write the page next to its final name and rename it into place, so a page
/// file that exists is always complete.
async fn write_page_file(output_dir: &Path, file_name: &str, html: &str) -> Result<PathBuf> {
    let page_path = output_dir.join(file_name);
    let temp_path = output_dir.join(format!("{}{}", file_name, TEMP_SUFFIX));

    fs::write(&temp_path, html)
        .await
        .map_err(|e| ScanError::io(&temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, &page_path).await {
        if let Err(cleanup) = fs::remove_file(&temp_path).await {
            warn!("Could not remove {}: {}", temp_path.display(), cleanup);
        }
        return Err(ScanError::io(&page_path, e));
    }

    absolute(&page_path)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| ScanError::io(path, e))
}

fn resource_progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

fn notify(callback: &Option<LoadProgressCallback>, message: String) {
    if let Some(callback) = callback {
        callback(message);
    }
}
