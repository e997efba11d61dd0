//! Unit tests for the comment module.

mod provider_tests;
