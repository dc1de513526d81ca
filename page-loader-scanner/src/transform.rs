use crate::classify::is_local;
use crate::error::{Result, ScanError};
use crate::naming::{NamingContext, has_extension};
use crate::resource::{ResourceKind, ResourceReference};
use kuchikikiki::NodeRef;
use kuchikikiki::traits::TendrilSink;
use tracing::debug;
use url::Url;

/// Elements scanned for references, in scan order, with the attribute that
/// holds the reference.
const SCANNED_ELEMENTS: [(&str, &str); 3] = [("img", "src"), ("link", "href"), ("script", "src")];

#[derive(Debug, Clone)]
pub struct TransformedDocument {
    pub html: String,
    pub resources: Vec<ResourceReference>,
}

/// Rewrite every local reference in `document` to its local path and collect
/// the references that need to be downloaded.
///
/// Images are scanned first, then links, then scripts; within each kind the
/// references keep their source order. Foreign references are left as they
/// are and are not returned.
pub fn transform(document: &str, page_url: &Url, naming: &NamingContext) -> Result<TransformedDocument> {
    let root = kuchikikiki::parse_html().one(document);
    let mut resources = Vec::new();

    for (tag, attribute) in SCANNED_ELEMENTS {
        rewrite_elements(&root, tag, attribute, page_url, naming, &mut resources)?;
    }

    let mut html = Vec::new();
    root.serialize(&mut html)
        .map_err(|e| ScanError::Parse(format!("Failed to serialize document: {}", e)))?;
    let html = String::from_utf8(html)
        .map_err(|e| ScanError::Parse(format!("Serialized document is not UTF-8: {}", e)))?;

    debug!("Found {} local resources", resources.len());
    Ok(TransformedDocument { html, resources })
}

fn rewrite_elements(
    root: &NodeRef,
    tag: &str,
    attribute: &str,
    page_url: &Url,
    naming: &NamingContext,
    resources: &mut Vec<ResourceReference>,
) -> Result<()> {
    let elements = root
        .select(tag)
        .map_err(|_| ScanError::Parse(format!("Invalid selector: {}", tag)))?;

    for element in elements {
        let value = {
            let attributes = element.attributes.borrow();
            match attributes.get(attribute).map(str::trim) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => continue,
            }
        };

        if !is_local(&value, page_url) {
            debug!("Skipping foreign {} reference {}", tag, value);
            continue;
        }

        let local_path = naming.resource_path(&value);
        debug!("Rewriting {} {} -> {}", tag, value, local_path);
        element.attributes.borrow_mut().insert(attribute, local_path);
        resources.push(ResourceReference::new(value.clone(), kind_for(tag, &value)));
    }

    Ok(())
}

fn kind_for(tag: &str, reference: &str) -> ResourceKind {
    match tag {
        "img" => ResourceKind::Image,
        "script" => ResourceKind::Script,
        _ if has_extension(reference) => ResourceKind::Stylesheet,
        _ => ResourceKind::LinkDocument,
    }
}
