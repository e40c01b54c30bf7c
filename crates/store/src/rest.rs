use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::source::CompanySource;
use crate::types::SortOrder;
use async_trait::async_trait;
use directory_model::{CompanyRow, NewCompanyRow};
use reqwest::{header, Client, RequestBuilder, Response};

/// PostgREST client for the hosted companies table
pub struct RestSource {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestSource {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        if config.table.trim().is_empty() {
            return Err(StoreError::InvalidConfig("table name is empty".to_string()));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", config.url, config.table),
            api_key: config.api_key.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
    }
}

#[async_trait]
impl CompanySource for RestSource {
    async fn select(&self, order: SortOrder) -> Result<Vec<CompanyRow>> {
        log::debug!("GET {} (order={})", self.endpoint, order.as_query());
        let response = self
            .authorize(self.client.get(&self.endpoint))
            .query(&[("select", "*"), ("order", order.as_query())])
            .send()
            .await?;
        let body = ensure_success(response).await?.bytes().await?;
        let rows: Vec<CompanyRow> = serde_json::from_slice(&body)?;
        log::debug!("External store returned {} rows", rows.len());
        Ok(rows)
    }

    async fn insert(&self, row: NewCompanyRow) -> Result<()> {
        log::debug!("POST {} ({})", self.endpoint, row.nome);
        let response = self
            .authorize(self.client.post(&self.endpoint))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}
