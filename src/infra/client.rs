//! Typed client for the catalogue, spoken through the local proxy.
//!
//! - One GET per collection; ports and items are filtered server-side with a
//!   JSON `filter` query parameter.
//! - Failures are logged with their cause and surface to callers only as
//!   `Failed to fetch <resource>`.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::domain::{Country, CountryId, Item, Port, PortId, Resource};

const USER_AGENT: &str = concat!("port-goods-quote/", env!("CARGO_PKG_VERSION"));

const COUNTRIES_PATH: &str = "negaras";
const PORTS_PATH: &str = "pelabuhans";
const ITEMS_PATH: &str = "barangs";

#[derive(Debug, Error)]
pub enum DataClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch {0}")]
    Fetch(Resource),
}

#[derive(Clone, Debug)]
pub struct DataClient {
    http: Client,
    base_url: Url,
}

impl DataClient {
    pub fn new(config: &ClientConfig) -> Result<Self, DataClientError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: directory_url(config.proxy_base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list_countries(&self) -> Result<Vec<Country>, DataClientError> {
        self.fetch_list(Resource::Countries, self.url(COUNTRIES_PATH))
            .await
    }

    pub async fn list_ports(&self, country_id: CountryId) -> Result<Vec<Port>, DataClientError> {
        tracing::debug!(country_id, "fetching ports");
        self.fetch_list(
            Resource::Ports,
            self.filtered_url(PORTS_PATH, "id_negara", country_id),
        )
        .await
    }

    pub async fn list_items(&self, port_id: PortId) -> Result<Vec<Item>, DataClientError> {
        self.fetch_list(
            Resource::Items,
            self.filtered_url(ITEMS_PATH, "id_pelabuhan", port_id),
        )
        .await
    }

    /// Runs one request and collapses any failure into [`DataClientError::Fetch`].
    async fn fetch_list<T>(
        &self,
        resource: Resource,
        url: Result<Url, url::ParseError>,
    ) -> Result<Vec<T>, DataClientError>
    where
        T: DeserializeOwned,
    {
        match self.fetch_json(url).await {
            Ok(data) => Ok(data),
            Err(error) => {
                tracing::error!(%resource, %error, "data request failed");
                Err(DataClientError::Fetch(resource))
            }
        }
    }

    async fn fetch_json<T>(&self, url: Result<Url, url::ParseError>) -> Result<T, DataClientError>
    where
        T: DeserializeOwned,
    {
        let url = url?;
        tracing::debug!(%url, "issuing data request");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    fn filtered_url(&self, path: &str, field: &str, id: i64) -> Result<Url, url::ParseError> {
        let mut url = self.url(path)?;
        let filter = json!({ "where": { field: id } });
        url.query_pairs_mut()
            .append_pair("filter", &filter.to_string());
        Ok(url)
    }
}

/// `Url::join` drops the last segment unless the base ends in `/`.
fn directory_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
