use std::env;

use common::models::Client;
use dotenv::dotenv;

/// Outcome of a request, shown as a transient toast. Every failure looks the
/// same to the user regardless of cause.
#[derive(Debug, Clone)]
pub enum Notice {
    Success(String),
    Failure(String),
}

/// Thin HTTP client for the record service.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn from_env() -> Self {
        dotenv().ok();
        let base_url =
            env::var("API_BASE").unwrap_or_else(|_| "http://localhost:8080".to_string());
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn get_all(&self) -> anyhow::Result<Vec<Client>> {
        let clients = self
            .http
            .get(format!("{}/api/client/getAll", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Client>>()
            .await?;

        Ok(clients)
    }

    pub async fn add(&self, client: &Client) -> anyhow::Result<Client> {
        // The store assigns the real id; zero out the placeholder first.
        let mut candidate = client.clone();
        candidate.client_id = 0;

        let created = self
            .http
            .post(format!("{}/api/client/add", self.base_url))
            .json(&candidate)
            .send()
            .await?
            .error_for_status()?
            .json::<Client>()
            .await?;

        Ok(created)
    }

    pub async fn update(&self, client: &Client) -> anyhow::Result<Client> {
        let updated = self
            .http
            .put(format!("{}/api/client/update", self.base_url))
            .json(client)
            .send()
            .await?
            .error_for_status()?
            .json::<Client>()
            .await?;

        Ok(updated)
    }

    pub async fn delete(&self, client_id: i32) -> anyhow::Result<Client> {
        let deleted = self
            .http
            .delete(format!("{}/api/client/delete/{}", self.base_url, client_id))
            .send()
            .await?
            .error_for_status()?
            .json::<Client>()
            .await?;

        Ok(deleted)
    }
}
