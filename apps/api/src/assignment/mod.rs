// Agent assignment: eligibility filtering plus weighted best-fit scoring.
// Depends on workload::calculator for the availability component.

pub mod assigner;
pub mod batch;
pub mod handlers;
