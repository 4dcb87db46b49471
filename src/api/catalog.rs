//! HTTP Catalog Client
//!
//! `reqwest` over the browser fetch API on wasm32, over hyper natively.

use std::num::NonZeroU32;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::CatalogSource;
use crate::config::AppConfig;
use crate::error::{FetchError, FetchFailure};
use crate::models::{CatalogItemDetail, CatalogItemSummary, ListPage};

/// `GET /pokemon` response body
#[derive(Debug, Deserialize)]
struct ListResponse {
    count: u32,
    next: Option<String>,
    results: Vec<CatalogItemSummary>,
}

impl From<ListResponse> for ListPage {
    fn from(response: ListResponse) -> Self {
        ListPage {
            total: response.count,
            has_next: response.next.is_some(),
            items: response.results,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, FetchFailure> {
        let response = request
            .send()
            .await
            .map_err(|e| FetchFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchFailure::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl CatalogSource for CatalogClient {
    async fn list_page(&self, offset: u32, limit: NonZeroU32) -> Result<ListPage, FetchError> {
        log::debug!("GET page offset={} limit={}", offset, limit);
        let request = self
            .http
            .get(format!("{}/pokemon", self.base_url))
            .query(&[("limit", limit.get()), ("offset", offset)]);

        self.get_json::<ListResponse>(request)
            .await
            .map(ListPage::from)
            .map_err(|reason| FetchError::ListPage { offset, reason })
    }

    async fn get_detail(&self, id: u32) -> Result<CatalogItemDetail, FetchError> {
        log::debug!("GET detail id={}", id);
        let request = self.http.get(format!("{}/pokemon/{}", self.base_url, id));

        self.get_json::<CatalogItemDetail>(request)
            .await
            .map_err(|reason| FetchError::Detail { id, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn page_size(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_list_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/pokemon")
                    .query_param("limit", "6")
                    .query_param("offset", "12");
                then.status(200).json_body(json!({
                    "count": 1302,
                    "next": "https://pokeapi.co/api/v2/pokemon?offset=18&limit=6",
                    "previous": "https://pokeapi.co/api/v2/pokemon?offset=6&limit=6",
                    "results": [
                        {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"},
                        {"name": "charmeleon", "url": "https://pokeapi.co/api/v2/pokemon/5/"}
                    ]
                }));
            })
            .await;

        let client = CatalogClient::new(server.base_url());
        let page = client.list_page(12, page_size(6)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.total, 1302);
        assert!(page.has_next);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].name, "charmeleon");
        assert_eq!(page.items[1].id(), Some(5));
    }

    #[tokio::test]
    async fn test_last_page_has_no_next() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/pokemon");
                then.status(200).json_body(json!({
                    "count": 2,
                    "next": null,
                    "previous": null,
                    "results": []
                }));
            })
            .await;

        let client = CatalogClient::new(format!("{}/", server.base_url()));
        let page = client.list_page(0, page_size(6)).await.unwrap();
        assert!(!page.has_next);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_page_status_error_carries_offset() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/pokemon");
                then.status(500);
            })
            .await;

        let client = CatalogClient::new(server.base_url());
        let err = client.list_page(30, page_size(6)).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::ListPage { offset: 30, reason: FetchFailure::Status(500) }
        );
    }

    #[tokio::test]
    async fn test_get_detail() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/pokemon/25");
                then.status(200).json_body(json!({
                    "id": 25,
                    "name": "pikachu",
                    "height": 4,
                    "weight": 60,
                    "sprites": {"front_default": "https://img/25.png", "front_shiny": null},
                    "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}],
                    "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}}]
                }));
            })
            .await;

        let client = CatalogClient::new(server.base_url());
        let detail = client.get_detail(25).await.unwrap();

        mock.assert_async().await;
        assert_eq!(detail.name, "pikachu");
        assert_eq!(detail.base_stat("hp"), 35);
    }

    #[tokio::test]
    async fn test_get_detail_not_found_carries_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/pokemon/9999");
                then.status(404).body("Not Found");
            })
            .await;

        let client = CatalogClient::new(server.base_url());
        let err = client.get_detail(9999).await.unwrap_err();
        assert_eq!(err, FetchError::Detail { id: 9999, reason: FetchFailure::Status(404) });
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_get_detail_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/pokemon/1");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let client = CatalogClient::new(server.base_url());
        let err = client.get_detail(1).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Detail { id: 1, reason: FetchFailure::Decode(_) }
        ));
    }
}
