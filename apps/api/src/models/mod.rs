pub mod agent;
pub mod candidate;
pub mod email;
pub mod job;
pub mod matching;
pub mod outreach;
