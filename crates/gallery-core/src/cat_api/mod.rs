//! Client for The Cat API image search.
//!
//! Docs: https://docs.thecatapi.com/api-reference/images/images-search

mod models;
mod options;

pub use models::{CatBreed, CatCategory, CatImage};
pub use options::{FetchOptions, ImageOrder, ImageSize};

use crate::error::{GalleryError, Result};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.thecatapi.com/v1";
const IMAGES_SEARCH_PATH: &str = "/images/search";
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub struct CatApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CatApiClient {
    /// Fails with a configuration error when no usable key is given.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GalleryError::Configuration("The Cat API requires a key.".to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("cat-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| GalleryError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(CatApiClient {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}{IMAGES_SEARCH_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Requests one batch of images, in the order the API returns them.
    pub async fn fetch_items(&self, options: &FetchOptions) -> Result<Vec<CatImage>> {
        let url = self.search_url();
        debug!(
            %url,
            size = %options.size,
            order = %options.order,
            limit = options.limit,
            page = ?options.page,
            "Requesting cat images"
        );
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .query(&options.query_pairs())
            .send()
            .await
            .map_err(|err| GalleryError::Network(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, %url, "The Cat API returned a failure status");
            return Err(GalleryError::Network(format!(
                "The Cat API responded with {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| GalleryError::Network(format!("failed to read response body: {err}")))?;
        let images = parse_images(&body)?;
        debug!(count = images.len(), "Received cat images");
        Ok(images)
    }
}

pub fn parse_images(body: &str) -> Result<Vec<CatImage>> {
    serde_json::from_str(body)
        .map_err(|err| GalleryError::Network(format!("unexpected response body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FIXTURE: &str = r#"[
        {
            "id": "0XYvRd7oD",
            "url": "https://cdn2.thecatapi.com/images/0XYvRd7oD.jpg",
            "width": 1204,
            "height": 1445,
            "breeds": [
                {
                    "id": "abys",
                    "name": "Abyssinian",
                    "origin": "Egypt",
                    "temperament": "Active, Energetic, Independent",
                    "life_span": "14 - 15",
                    "reference_image_id": null,
                    "hairless": 0,
                    "weight": { "imperial": "7  -  10", "metric": "3 - 5" }
                }
            ],
            "categories": [{ "id": 5, "name": "boxes" }]
        },
        { "id": "b1", "url": "https://cdn2.thecatapi.com/images/b1.gif" }
    ]"#;

    #[test]
    fn parses_search_results_in_order() {
        let images = parse_images(SEARCH_FIXTURE).expect("fixture parses");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, "0XYvRd7oD");
        assert_eq!(images[0].dimensions(), Some((1204, 1445)));
        assert_eq!(
            images[0].primary_breed().map(|b| b.name.as_str()),
            Some("Abyssinian")
        );
        assert_eq!(images[0].categories[0].name, "boxes");
        assert_eq!(images[1].id, "b1");
        assert!(images[1].breeds.is_empty());
        assert_eq!(images[1].dimensions(), None);
    }

    #[test]
    fn malformed_body_is_a_network_error() {
        let err = parse_images("<html>oops</html>").unwrap_err();
        assert!(matches!(err, GalleryError::Network(_)));
    }

    #[test]
    fn missing_or_blank_key_is_a_configuration_error() {
        for key in [None, Some(String::new()), Some("   ".to_string())] {
            let err = CatApiClient::new(DEFAULT_BASE_URL, key).unwrap_err();
            assert_eq!(
                err,
                GalleryError::Configuration("The Cat API requires a key.".to_string())
            );
        }
    }

    #[test]
    fn search_url_joins_base_without_double_slash() {
        let client = CatApiClient::new("https://example.test/v1/", Some("key".into())).unwrap();
        assert_eq!(client.search_url(), "https://example.test/v1/images/search");
    }
}
