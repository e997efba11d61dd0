//! Teko: comment management with external issue-tracker synchronization.
//!
//! Teko keeps comments on its own entities (tasks, agents, repositories) and
//! mirrors comments on externally tracked tasks to the matching GitHub issue
//! or Jira ticket.
//!
//! # Architecture
//!
//! Teko follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, HTTP, providers)
//!
//! # Modules
//!
//! - [`comment`]: Comment lifecycle and external synchronization
//! - [`config`]: Provider credentials and transport settings

pub mod comment;
pub mod config;
