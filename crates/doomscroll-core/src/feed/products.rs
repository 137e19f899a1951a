//! Product metadata for ad creatives (`products.json`).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

const DEFAULT_CTA_TEXT: &str = "View product";

/// A product an ad can link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMeta {
    pub id: String,
    pub name: String,
    pub image_path: PathBuf,
    pub description_path: Option<PathBuf>,
    pub url: String,
    pub cta_text: String,
}

/// Load product metadata keyed by image file name.
///
/// Accepts either a bare list of products or `{"products": [...]}`. Entries
/// without a string `image_path` and `url` are skipped. A missing or invalid
/// file yields an empty map.
pub fn load_product_metadata(config_path: &Path) -> HashMap<String, ProductMeta> {
    let raw = match fs::read_to_string(config_path) {
        Ok(raw) => raw,
        Err(_) if !config_path.exists() => {
            tracing::info!(path = %config_path.display(), "No products config found; product links disabled");
            return HashMap::new();
        }
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "Failed to read products config");
            return HashMap::new();
        }
    };

    let data: Value = match serde_json::from_str(&raw) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "Failed to parse products config");
            return HashMap::new();
        }
    };

    let entries = match data {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        },
        _ => {
            tracing::warn!(path = %config_path.display(), "Products config has unexpected structure; expected a list");
            return HashMap::new();
        }
    };

    let mut by_basename = HashMap::new();
    for entry in &entries {
        let Some(meta) = parse_entry(entry) else {
            continue;
        };
        let Some(basename) = meta.image_path.file_name() else {
            continue;
        };
        by_basename.insert(basename.to_string_lossy().into_owned(), meta);
    }
    by_basename
}

fn parse_entry(entry: &Value) -> Option<ProductMeta> {
    let image_path = PathBuf::from(entry.get("image_path")?.as_str()?);
    let url = entry.get("url")?.as_str()?.to_string();

    let id = non_empty_string(entry.get("id")).unwrap_or_else(|| {
        image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let name = non_empty_string(entry.get("name")).unwrap_or_else(|| id.clone());
    let cta_text =
        non_empty_string(entry.get("cta_text")).unwrap_or_else(|| DEFAULT_CTA_TEXT.to_string());
    let description_path = entry
        .get("description_path")
        .and_then(Value::as_str)
        .map(PathBuf::from);

    Some(ProductMeta {
        id,
        name,
        image_path,
        description_path,
        url,
        cta_text,
    })
}

// Numeric ids are accepted; null and empty strings fall back to the default.
fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The product's description text, trimmed. Empty when unavailable.
pub fn load_product_description(meta: &ProductMeta) -> String {
    meta.description_path
        .as_deref()
        .and_then(|path| fs::read_to_string(path).ok())
        .map(|text| text.trim_matches([' ', '\n', '\t']).to_string())
        .unwrap_or_default()
}
