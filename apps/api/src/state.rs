use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::eclipse_client::EclipseClient;
use crate::email_ingest::mailbox::Mailbox;
use crate::email_ingest::parser::JobExtractor;
use crate::llm_client::LlmClient;
use crate::mailer::Mailer;
use crate::matching::CandidateMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Turns NHS emails into job fields. Default: LlmJobExtractor.
    pub extractor: Arc<dyn JobExtractor>,
    /// Scores candidates against a job. Default: LlmCandidateMatcher.
    pub matcher: Arc<dyn CandidateMatcher>,
    /// Source of incoming job emails. Default: SimulatedMailbox over the NHS domains.
    pub mailbox: Arc<dyn Mailbox>,
    pub mailer: Mailer,
    /// `None` when the Eclipse credentials are not configured.
    pub eclipse: Option<Arc<EclipseClient>>,
}
