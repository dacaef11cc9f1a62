use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Single-page fetches against list endpoints. Nothing here follows `next`
/// links: callers only ever want the first page, or the page count.
pub struct ListFetcher<'a> {
    client: &'a Client,
}

impl<'a> ListFetcher<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn fetch_first_page<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        what: &str,
    ) -> Result<Vec<T>> {
        let url = with_per_page(base_url, per_page);
        tracing::debug!("Fetching: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch {}: {} - {}",
                what, status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Total number of items behind a list endpoint, read from the
    /// `rel="last"` link when the list is requested one item per page.
    pub async fn count_items(&self, base_url: &str) -> Result<u64> {
        let url = with_per_page(base_url, 1);
        tracing::debug!("Counting: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to count {}: {}",
                base_url,
                response.status()
            )));
        }

        if let Some(last) = last_page_from_response(&response) {
            return Ok(last);
        }

        // Everything fits on one page.
        let items: Vec<Value> = response.json().await?;
        Ok(items.len() as u64)
    }
}

fn with_per_page(base_url: &str, per_page: u32) -> String {
    let separator = if base_url.contains('?') { "&" } else { "?" };
    format!("{}{}per_page={}", base_url, separator, per_page)
}

fn last_page_from_response(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("link")
        .and_then(|v| v.to_str().ok())
        .and_then(last_page)
}

/// Page number of the `rel="last"` entry of a `Link` header.
pub fn last_page(link_header: &str) -> Option<u64> {
    link_header
        .split(',')
        .find(|part| part.contains("rel=\"last\""))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            part.get(start..end)
        })
        .and_then(|url| url.split_once('?').map(|(_, query)| query))
        .and_then(|query| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
}
