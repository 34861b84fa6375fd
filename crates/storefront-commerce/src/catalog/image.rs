//! Product image locator resolution.
//!
//! Catalog rows store images in several shapes: full URLs, site-relative
//! paths, Google Drive share links, or a bare path inside the storage
//! bucket. [`ImageResolver`] turns any of them into something an `<img>`
//! can load.

use serde::{Deserialize, Serialize};

/// Image resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Base URL of the storage service (no trailing slash). When unset,
    /// bucket paths resolve to site-relative URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_base_url: Option<String>,

    /// Public bucket holding product images.
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Locator returned for products without an image.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Append `?t=<millis>` to bucket URLs so replaced images are refetched.
    #[serde(default = "default_true")]
    pub cache_bust: bool,
}

fn default_bucket() -> String {
    "product-images".to_string()
}

fn default_placeholder() -> String {
    "/placeholder.svg".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            storage_base_url: None,
            bucket: default_bucket(),
            placeholder: default_placeholder(),
            cache_bust: true,
        }
    }
}

/// Resolves catalog image locators to loadable URLs.
#[derive(Debug, Clone, Default)]
pub struct ImageResolver {
    config: ImageConfig,
}

impl ImageResolver {
    /// Create a resolver from settings.
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    /// Resolve a locator using the current time for cache busting.
    pub fn resolve(&self, locator: &str) -> String {
        self.resolve_at(locator, chrono::Utc::now().timestamp_millis())
    }

    /// Resolve a locator with an explicit cache-busting timestamp.
    pub fn resolve_at(&self, locator: &str, now_millis: i64) -> String {
        let src = locator.trim();
        if src.is_empty() {
            return self.config.placeholder.clone();
        }

        if src.contains("drive.google.com") {
            if let Some(file_id) = drive_file_id(src) {
                return format!("https://drive.google.com/uc?export=view&id={}", file_id);
            }
        }

        if src.starts_with("http://") || src.starts_with("https://") || src.starts_with('/') {
            return src.to_string();
        }

        let base = self
            .config
            .storage_base_url
            .as_deref()
            .map(|b| b.trim_end_matches('/'))
            .unwrap_or("");
        let url = format!(
            "{}/storage/v1/object/public/{}/{}",
            base, self.config.bucket, src
        );

        if self.config.cache_bust {
            format!("{}?t={}", url, now_millis)
        } else {
            url
        }
    }
}

/// Extract the file id from a `.../d/<id>/...` Drive link.
fn drive_file_id(src: &str) -> Option<&str> {
    let start = src.find("/d/")? + 3;
    let rest = &src[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());

    if end == 0 {
        None
    } else {
        Some(&rest[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ImageResolver {
        ImageResolver::new(ImageConfig {
            storage_base_url: Some("https://example.supabase.co/".to_string()),
            ..ImageConfig::default()
        })
    }

    #[test]
    fn test_empty_locator_uses_placeholder() {
        assert_eq!(resolver().resolve_at("", 0), "/placeholder.svg");
        assert_eq!(resolver().resolve_at("   ", 0), "/placeholder.svg");
    }

    #[test]
    fn test_drive_share_link() {
        let url = resolver().resolve_at(
            "https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing",
            0,
        );
        assert_eq!(url, "https://drive.google.com/uc?export=view&id=1AbC_d-9");
    }

    #[test]
    fn test_drive_link_without_file_id_passes_through() {
        let src = "https://drive.google.com/open?id=xyz";
        assert_eq!(resolver().resolve_at(src, 0), src);
    }

    #[test]
    fn test_absolute_and_relative_urls_unchanged() {
        assert_eq!(
            resolver().resolve_at(" https://cdn.example.com/a.png ", 0),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(resolver().resolve_at("http://x/a.png", 0), "http://x/a.png");
        assert_eq!(resolver().resolve_at("/images/a.png", 0), "/images/a.png");
    }

    #[test]
    fn test_bucket_path_gets_public_url() {
        assert_eq!(
            resolver().resolve_at("products/mug.jpg", 1700000000000),
            "https://example.supabase.co/storage/v1/object/public/product-images/products/mug.jpg?t=1700000000000"
        );
    }

    #[test]
    fn test_bucket_path_without_cache_bust_or_base() {
        let resolver = ImageResolver::new(ImageConfig {
            cache_bust: false,
            ..ImageConfig::default()
        });
        assert_eq!(
            resolver.resolve_at("products/mug.jpg", 5),
            "/storage/v1/object/public/product-images/products/mug.jpg"
        );
    }
}
