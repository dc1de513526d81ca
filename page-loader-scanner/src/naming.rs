//! Deterministic local names for a saved page and its resources.
//!
//! Every function here is total: any input string maps to some file name, and
//! the same input always maps to the same name. The transformer and the
//! fetcher both call into this module, which is how the path written into the
//! document and the path written on disk stay identical.

use url::Url;

pub const PAGE_EXTENSION: &str = ".html";
pub const RESOURCE_DIR_SUFFIX: &str = "_files";

/// Per-run naming values derived from the page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingContext {
    pub resource_dir_name: String,
    pub domain_token: String,
}

impl NamingContext {
    pub fn from_page_url(page_url: &Url) -> Self {
        Self {
            resource_dir_name: resource_dir_name(page_url),
            domain_token: domain_token(page_url),
        }
    }

    /// Relative path of a resource, as written into the document.
    pub fn resource_path(&self, reference: &str) -> String {
        resource_path(reference, &self.domain_token, &self.resource_dir_name)
    }
}

/// `https://example.com/courses` -> `example-com-courses`
///
/// Host, port and path keep their shape; only `.` and `/` become `-`. A bare
/// root path contributes nothing, so `https://example.com` is `example-com`.
pub fn page_file_stem(page_url: &Url) -> String {
    let mut location = page_url.host_str().unwrap_or_default().to_string();
    if let Some(port) = page_url.port() {
        location.push_str(&format!(":{}", port));
    }
    if page_url.path() != "/" {
        location.push_str(page_url.path());
    }
    if location.is_empty() {
        return "index".to_string();
    }
    location.replace(['.', '/'], "-")
}

pub fn page_file_name(page_url: &Url) -> String {
    format!("{}{}", page_file_stem(page_url), PAGE_EXTENSION)
}

pub fn resource_dir_name(page_url: &Url) -> String {
    format!("{}{}", page_file_stem(page_url), RESOURCE_DIR_SUFFIX)
}

/// Page hostname with dots turned into dashes.
pub fn domain_token(page_url: &Url) -> String {
    page_url.host_str().unwrap_or_default().replace('.', "-")
}

/// Local path for a resource: `{resource_dir_name}/{domain_token}-{flattened path}`.
pub fn resource_path(reference: &str, domain_token: &str, resource_dir_name: &str) -> String {
    let path = reference_path(reference);
    let mut flattened = path.replace('/', "-");
    if file_extension(&path).is_none() {
        flattened.push_str(PAGE_EXTENSION);
    }
    format!("{}/{}-{}", resource_dir_name, domain_token, flattened)
}

/// Path part of a reference with query, fragment and one leading slash removed.
pub fn reference_path(reference: &str) -> String {
    let path = match parse_absolute(reference) {
        Some(url) => url.path().to_string(),
        None => strip_query_and_fragment(reference).to_string(),
    };
    match path.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}

/// Extension of the last path segment, if it has a non-empty one.
pub fn file_extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rsplit_once('.') {
        Some((_, extension)) if !extension.is_empty() => Some(extension),
        _ => None,
    }
}

pub fn has_extension(reference: &str) -> bool {
    file_extension(&reference_path(reference)).is_some()
}

fn parse_absolute(reference: &str) -> Option<Url> {
    if let Some(rest) = reference.strip_prefix("//") {
        return Url::parse(&format!("http://{}", rest)).ok();
    }
    Url::parse(reference).ok()
}

fn strip_query_and_fragment(reference: &str) -> &str {
    match reference.find(['?', '#']) {
        Some(index) => &reference[..index],
        None => reference,
    }
}
