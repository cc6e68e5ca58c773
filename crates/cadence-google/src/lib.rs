//! # cadence-google
//!
//! Google Workspace backends for the Cadence engine: a tracker sheet read
//! and written through the Sheets values API, and milestone notes pulled
//! from Google Docs.

#![deny(unsafe_code)]

pub mod docs;
pub mod sheets;

pub use docs::{DocsConfig, GoogleDocs, extract_doc_id};
pub use sheets::{SheetsConfig, SheetsTable};
