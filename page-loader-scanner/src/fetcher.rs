use crate::classify::resolve;
use crate::client::HttpClient;
use crate::error::{Result, ScanError};
use crate::naming::NamingContext;
use crate::resource::{ResourceKind, ResourceReference};
use crate::result::FetchOutcome;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

pub type OutcomeCallback = Arc<dyn Fn(&FetchOutcome) + Send + Sync>;

/// Downloads the resources extracted from a page into its resource directory.
///
/// Every resource is fetched in its own task. A failing resource is recorded
/// in its [`FetchOutcome`] and never affects its siblings.
pub struct ResourceFetcher {
    client: HttpClient,
    max_concurrency: Option<usize>,
    outcome_callback: Option<OutcomeCallback>,
}

impl ResourceFetcher {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            max_concurrency: None,
            outcome_callback: None,
        }
    }

    /// Bound the number of downloads in flight. Unbounded by default.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit.max(1));
        self
    }

    pub fn with_outcome_callback(mut self, callback: OutcomeCallback) -> Self {
        self.outcome_callback = Some(callback);
        self
    }

    /// Fetch every resource and write it under `output_dir`.
    ///
    /// Returns one outcome per resource, in the order of `resources`. Only a
    /// failure to create the resource directory is returned as an error.
    pub async fn fetch_all(
        &self,
        resources: &[ResourceReference],
        page_url: &Url,
        naming: &NamingContext,
        output_dir: &Path,
    ) -> Result<Vec<FetchOutcome>> {
        if resources.is_empty() {
            debug!("No local resources to fetch");
            return Ok(Vec::new());
        }

        let resource_dir = output_dir.join(&naming.resource_dir_name);
        fs::create_dir_all(&resource_dir)
            .await
            .map_err(|e| ScanError::io(&resource_dir, e))?;

        info!(
            "Fetching {} resources into {}",
            resources.len(),
            resource_dir.display()
        );

        let semaphore = self
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit)));

        let mut handles = Vec::with_capacity(resources.len());
        for reference in resources {
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            let callback = self.outcome_callback.clone();
            let reference = reference.clone();
            let page_url = page_url.clone();
            let local_path = output_dir.join(naming.resource_path(&reference.original_url));

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let outcome = fetch_resource(&client, reference, &page_url, local_path).await;
                if let Some(callback) = callback {
                    callback(&outcome);
                }
                outcome
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (joined, reference) in join_all(handles).await.into_iter().zip(resources) {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    let error = ScanError::from(e);
                    warn!("Fetch task for {} failed: {}", reference.original_url, error);
                    outcomes.push(FetchOutcome::with_error(
                        reference.clone(),
                        None,
                        None,
                        error.to_string(),
                    ));
                }
            }
        }

        let failed = outcomes.iter().filter(|o| !o.success).count();
        info!(
            "Fetched {} of {} resources ({} failed)",
            outcomes.len() - failed,
            outcomes.len(),
            failed
        );

        Ok(outcomes)
    }
}

async fn fetch_resource(
    client: &HttpClient,
    reference: ResourceReference,
    page_url: &Url,
    local_path: PathBuf,
) -> FetchOutcome {
    let url = match resolve(&reference.original_url, page_url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Cannot resolve {}: {}", reference.original_url, e);
            return FetchOutcome::with_error(reference, None, Some(local_path), e.to_string());
        }
    };

    match download(client, reference.kind, &url, &local_path).await {
        Ok(bytes_written) => {
            debug!("Saved {} to {} ({} bytes)", url, local_path.display(), bytes_written);
            FetchOutcome::new(reference, url.to_string(), local_path, bytes_written)
        }
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            FetchOutcome::with_error(reference, Some(url.to_string()), Some(local_path), e.to_string())
        }
    }
}

async fn download(client: &HttpClient, kind: ResourceKind, url: &Url, path: &Path) -> Result<u64> {
    let body = if kind.is_text() {
        client.fetch_text(url.as_str()).await?.into_bytes()
    } else {
        client.fetch_bytes(url.as_str()).await?
    };

    fs::write(path, &body)
        .await
        .map_err(|e| ScanError::io(path, e))?;

    Ok(body.len() as u64)
}
