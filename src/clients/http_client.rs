use std::time::Duration;

use reqwest::{header, Client};

use crate::error::{DashboardError, Result};

/// Shared HTTP access for CSV sources and title pages. One attempt per call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let user_agent = header::HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| header::HeaderValue::from_static("ratings_dashboard"));

        Ok(Self {
            client: Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()?,
        })
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        log::debug!("Fetching {}", url);
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.text().await?)
    }
}
