use crate::error::{Result, ScanError};
use tracing::debug;
use url::{ParseError, Url};

/// Decide whether `reference` points at the same host as `page_url`.
///
/// Relative references are local because they resolve against the page.
/// Protocol-relative references (`//host/path`) are resolved first and then
/// compared by host like absolute ones. Scheme and port never take part in the
/// comparison. A page without a host makes every reference foreign.
pub fn is_local(reference: &str, page_url: &Url) -> bool {
    let Some(page_host) = page_url.host_str() else {
        return false;
    };

    match Url::parse(reference) {
        Ok(absolute) => absolute.host_str() == Some(page_host),
        Err(ParseError::RelativeUrlWithoutBase) => match page_url.join(reference) {
            Ok(resolved) => resolved.host_str() == Some(page_host),
            // Still relative to the page even if the join rejects it
            Err(_) => true,
        },
        Err(e) => {
            debug!("Treating unparseable reference {:?} as foreign: {}", reference, e);
            false
        }
    }
}

/// Resolve `reference` against the page URL.
pub fn resolve(reference: &str, page_url: &Url) -> Result<Url> {
    page_url
        .join(reference)
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", reference, e)))
}
