mod agents;
mod assignment;
mod candidates;
mod config;
mod dashboard;
mod db;
mod eclipse_client;
mod email_ingest;
mod errors;
mod integrations;
mod jobs;
mod llm_client;
mod mailer;
mod matching;
mod models;
mod outreach;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod workload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::eclipse_client::EclipseClient;
use crate::email_ingest::mailbox::SimulatedMailbox;
use crate::email_ingest::parser::LlmJobExtractor;
use crate::llm_client::LlmClient;
use crate::mailer::Mailer;
use crate::matching::LlmCandidateMatcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Eclipse API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let llm = LlmClient::new(config.openai_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let mailer = Mailer::new(
        config.sendgrid_api_key.clone(),
        config.sendgrid_from_email.clone(),
        config.sendgrid_from_name.clone(),
    )?;
    if !mailer.is_configured() {
        info!("SENDGRID_API_KEY not set; outreach emails cannot be sent");
    }

    let eclipse = match &config.eclipse {
        Some(c) => {
            info!("Eclipse integration enabled ({})", c.base_url);
            Some(Arc::new(EclipseClient::new(
                c.base_url.clone(),
                c.client_id.clone(),
                c.client_secret.clone(),
            )?))
        }
        None => None,
    };

    info!("Watching NHS domains: {}", config.nhs_domains.join(", "));

    let state = AppState {
        db,
        extractor: Arc::new(LlmJobExtractor::new(llm.clone())),
        matcher: Arc::new(LlmCandidateMatcher::new(llm.clone())),
        mailbox: Arc::new(SimulatedMailbox::new(config.nhs_domains.clone())),
        llm,
        mailer,
        eclipse,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
