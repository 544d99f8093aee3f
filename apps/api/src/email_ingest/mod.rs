// NHS job-email ingestion: mailbox → parser → assignment → matching.

pub mod handlers;
pub mod mailbox;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod store;
