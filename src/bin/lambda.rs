//! Serverless entry point for the casino catalog.
//!
//! Deploy with `cargo lambda build --release --features lambda`.

use std::sync::Arc;

use casino_catalog::lambda::{CatalogRequest, build_service, handler};
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Casino catalog Lambda starting...");
    let service = Arc::new(build_service()?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<CatalogRequest>| {
        let service = Arc::clone(&service);
        async move { handler(service.as_ref(), event).await }
    }))
    .await
}
