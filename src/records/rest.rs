// src/records/rest.rs

//! Record store backed by the hosted database's REST API.
//!
//! Tables are exposed under `{base_url}/rest/v1/{table}`. Filters use the
//! `column=eq.value` convention and ordering uses `order=column.desc`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CasinoRecord, GameRecord, StoreConfig};
use crate::records::RecordStore;
use crate::utils::http;

pub const CASINOS_TABLE: &str = "casinos";
pub const GAMES_TABLE: &str = "games";

const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=representation";

/// Remote record store client.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl RestStore {
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
        })
    }

    /// Build a store client from configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            log::warn!("store.api_key is empty; requests will be anonymous");
        }
        Self::new(http::create_client(config)?, &config.base_url, &config.api_key)
    }

    /// URL of a table endpoint with query parameters.
    pub fn table_url(&self, table: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("Invalid store base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Turn non-success responses into store errors carrying the body.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::store(status.as_u16(), body))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = self.table_url(table, params)?;
        log::debug!("GET {}", url);
        let response = Self::check(self.request(Method::GET, url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<T>> {
        let filter = format!("eq.{value}");
        let rows: Vec<T> = self
            .select(table, &[("select", "*"), (column, filter.as_str()), ("limit", "1")])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn upsert<T>(&self, table: &str, record: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let url = self.table_url(table, &[])?;
        log::debug!("POST {}", url);
        let response = self
            .request(Method::POST, url)
            .header("Prefer", UPSERT_PREFERENCE)
            .json(record)
            .send()
            .await?;
        let rows: Vec<T> = Self::check(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::store(200, format!("{table}: upsert returned no rows")))
    }

    async fn delete(&self, table: &str, id: &str) -> Result<()> {
        let filter = format!("eq.{id}");
        let url = self.table_url(table, &[("id", filter.as_str())])?;
        log::debug!("DELETE {}", url);
        Self::check(self.request(Method::DELETE, url).send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn fetch_all_casinos(&self) -> Result<Vec<CasinoRecord>> {
        self.select(
            CASINOS_TABLE,
            &[
                ("select", "*"),
                ("status", "eq.active"),
                ("order", "rating.desc"),
            ],
        )
        .await
    }

    async fn fetch_casino_by_id(&self, id: &str) -> Result<Option<CasinoRecord>> {
        self.select_one(CASINOS_TABLE, "id", id).await
    }

    async fn fetch_casino_by_slug(&self, slug: &str) -> Result<Option<CasinoRecord>> {
        self.select_one(CASINOS_TABLE, "slug", slug).await
    }

    async fn fetch_all_games(&self) -> Result<Vec<GameRecord>> {
        self.select(
            GAMES_TABLE,
            &[
                ("select", "*"),
                ("status", "eq.active"),
                ("order", "name.asc"),
            ],
        )
        .await
    }

    async fn fetch_game_by_slug(&self, slug: &str) -> Result<Option<GameRecord>> {
        self.select_one(GAMES_TABLE, "slug", slug).await
    }

    async fn upsert_casino(&self, casino: &CasinoRecord) -> Result<CasinoRecord> {
        self.upsert(CASINOS_TABLE, casino).await
    }

    async fn delete_casino(&self, id: &str) -> Result<()> {
        self.delete(CASINOS_TABLE, id).await
    }

    async fn upsert_game(&self, game: &GameRecord) -> Result<GameRecord> {
        self.upsert(GAMES_TABLE, game).await
    }

    async fn delete_game(&self, id: &str) -> Result<()> {
        self.delete(GAMES_TABLE, id).await
    }
}
