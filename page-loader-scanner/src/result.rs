use crate::resource::ResourceReference;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub reference: ResourceReference,
    pub success: bool,
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    pub bytes_written: u64,
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn new(reference: ResourceReference, url: String, path: PathBuf, bytes_written: u64) -> Self {
        Self {
            reference,
            success: true,
            url: Some(url),
            path: Some(path),
            bytes_written,
            error: None,
        }
    }

    pub fn with_error(
        reference: ResourceReference,
        url: Option<String>,
        path: Option<PathBuf>,
        error: String,
    ) -> Self {
        Self {
            reference,
            success: false,
            url,
            path,
            bytes_written: 0,
            error: Some(error),
        }
    }
}
