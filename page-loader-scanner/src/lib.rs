pub mod classify;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod naming;
pub mod resource;
pub mod result;
pub mod transform;

pub use client::HttpClient;
pub use error::ScanError;
pub use fetcher::ResourceFetcher;
pub use naming::NamingContext;
pub use resource::{ResourceKind, ResourceReference};
pub use result::FetchOutcome;
pub use transform::{TransformedDocument, transform};
