//! # cadence-jira
//!
//! Issue-tracker publishing for the Cadence engine: posts status-update
//! comments to Jira Cloud over REST API v3, with plain text lifted into
//! ADF documents.

#![deny(unsafe_code)]

pub mod adf;
pub mod client;
pub mod errors;

pub use client::{JiraClient, JiraConfig, Receipt};
pub use errors::PublishError;
