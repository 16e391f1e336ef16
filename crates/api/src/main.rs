use std::sync::Arc;

use anyhow::Context;

use librarium_auth::{AuthConfig, PrincipalStore};
use librarium_catalog::BookStore;
use librarium_infra::{InMemoryBookStore, InMemoryPrincipalStore, seed_demo_data};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    librarium_observability::init();

    let private_path =
        std::env::var("LIBRARIUM_PRIVATE_KEY").unwrap_or_else(|_| "keys/private.pem".to_string());
    let public_path =
        std::env::var("LIBRARIUM_PUBLIC_KEY").unwrap_or_else(|_| "keys/public.pem".to_string());

    let private_pem = std::fs::read_to_string(&private_path)
        .with_context(|| format!("reading signing key from {private_path}"))?;
    let public_pem = std::fs::read_to_string(&public_path)
        .with_context(|| format!("reading verification key from {public_path}"))?;

    let config = AuthConfig::new(private_pem, public_pem);

    let users: Arc<dyn PrincipalStore> = Arc::new(InMemoryPrincipalStore::new());
    let books: Arc<dyn BookStore> = Arc::new(InMemoryBookStore::new());
    seed_demo_data(users.as_ref(), books.as_ref())
        .await
        .context("seeding demo data")?;

    let app = librarium_api::app::build_app(config, users, books)?;

    let port = std::env::var("PORT").unwrap_or_else(|_| "3005".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("binding 0.0.0.0:{port}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
