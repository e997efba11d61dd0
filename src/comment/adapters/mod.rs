//! Adapter implementations for comment ports.
//!
//! - [`memory`]: in-memory stores and a recording transport
//! - [`http`]: `reqwest` transport
//! - [`github`] and [`jira`]: provider strategies

pub mod github;
pub mod http;
pub mod jira;
pub mod memory;
mod remote;

pub use github::GitHubCommentProvider;
pub use http::ReqwestTransport;
pub use jira::JiraCommentProvider;
