// Workload balancing: per-agent scoring, team aggregates, rebalancing.
// Everything below handlers is pure and works on caller-owned snapshots.

pub mod calculator;
pub mod handlers;
pub mod rebalance;
pub mod team;
