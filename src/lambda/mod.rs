// src/lambda/mod.rs

//! Serverless handler for catalog reads.
//!
//! Each invocation carries a page action and its URL query string, and
//! returns the JSON the page renders. The service (and its record cache)
//! lives as long as the warm runtime.

use std::path::PathBuf;
use std::time::Instant;

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::engine::{GameQuery, GameSortKey};
use crate::error::{AppError, Result};
use crate::models::{Config, GameCategory};
use crate::records::{CachedStore, RecordStore, RestStore, SystemClock};
use crate::services::CatalogService;
use crate::utils::query::{decode_catalog_query, decode_selection};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG";

/// Page the invocation renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    List,
    Compare,
    Casino,
    Games,
    Payments,
    Overview,
}

/// Lambda invocation payload.
#[derive(Debug, Deserialize)]
pub struct CatalogRequest {
    #[serde(default)]
    pub action: Action,

    /// Raw URL query string, e.g. `payment=OXXO&sort=bonus`
    #[serde(default)]
    pub query: String,

    /// Detail page slug
    pub slug: Option<String>,
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct CatalogResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

/// Production service: REST store behind the TTL cache.
pub type LambdaService = CatalogService<CachedStore<RestStore, SystemClock>>;

/// Build the service from the config file named by `CATALOG_CONFIG`.
pub fn build_service() -> Result<LambdaService> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));
    let config = Config::load_or_default(&path);
    config.validate()?;

    let store = RestStore::from_config(&config.store)?;
    let ttl = config.cache.ttl()?;
    Ok(CatalogService::new(CachedStore::with_clock(store, SystemClock, ttl)))
}

/// Main Lambda handler function.
#[instrument(skip(service, event))]
pub async fn handler<S: RecordStore>(
    service: &CatalogService<S>,
    event: LambdaEvent<CatalogRequest>,
) -> std::result::Result<CatalogResponse, LambdaError> {
    let start = Instant::now();
    let (request, _context) = event.into_parts();
    info!("Catalog request: action={:?}, query={:?}", request.action, request.query);

    let response = match dispatch(service, &request).await {
        Ok(data) => CatalogResponse {
            success: true,
            data: Some(data),
            ..Default::default()
        },
        Err(e) => {
            error!("Catalog request failed: {}", e);
            CatalogResponse {
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };

    Ok(CatalogResponse {
        execution_time_ms: start.elapsed().as_millis() as u64,
        ..response
    })
}

async fn dispatch<S: RecordStore>(service: &CatalogService<S>, request: &CatalogRequest) -> Result<Value> {
    let data = match request.action {
        Action::List => serde_json::to_value(service.list(&decode_catalog_query(&request.query)).await)?,
        Action::Compare => {
            serde_json::to_value(service.comparison(&decode_selection(&request.query)).await)?
        }
        Action::Casino => {
            let slug = request
                .slug
                .as_deref()
                .ok_or_else(|| AppError::validation("casino action requires a slug"))?;
            let casino = service
                .casino_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::not_found(slug))?;
            serde_json::to_value(casino)?
        }
        Action::Games => serde_json::to_value(service.games(&game_query(&request.query)).await)?,
        Action::Payments => serde_json::to_value(service.payment_methods().await)?,
        Action::Overview => serde_json::to_value(service.overview().await)?,
    };
    Ok(data)
}

/// Games page parameters: `search`, `category`, `sort`.
fn game_query(query: &str) -> GameQuery {
    let mut games = GameQuery::default();
    for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        match &*key {
            "search" => games.search = value.trim().to_string(),
            "category" => games.category = GameCategory::parse(&value),
            "sort" => games.sort = GameSortKey::parse(&value),
            _ => {}
        }
    }
    games
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: CatalogRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.action, Action::List);
        assert!(req.query.is_empty());
        assert!(req.slug.is_none());
    }

    #[test]
    fn test_request_with_options() {
        let json = r#"{"action": "compare", "query": "casinos=c1,c2"}"#;
        let req: CatalogRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.action, Action::Compare);
        assert_eq!(decode_selection(&req.query).len(), 2);
    }

    #[test]
    fn test_game_query_params() {
        let q = game_query("?search=olympus&category=slots&sort=name");
        assert_eq!(q.search, "olympus");
        assert_eq!(q.category, Some(GameCategory::Slots));
        assert_eq!(q.sort, GameSortKey::Name);
    }
}
