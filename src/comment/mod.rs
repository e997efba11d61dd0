//! Comments on Teko entities and their mirrors on external issue trackers.
//!
//! A comment owned by a task that is linked to a GitHub or Jira issue is
//! replicated to that issue's comment thread whenever it is created, edited
//! or removed locally. Replication is best effort: local operations succeed
//! or fail on their own, and sync problems are logged and reported as a
//! [`services::SyncOutcome`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
