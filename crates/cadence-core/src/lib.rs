//! # cadence-core
//!
//! Foundation of the Cadence tracker engine: the Tracker Schema v1 data
//! model, the 1-based tabular access trait, and the hierarchical row-context
//! resolver.
//!
//! - **Model**: [`model::Milestone`], [`model::Context`], [`model::Update`],
//!   plus `WorkType` classification and schema validation
//! - **Table**: [`table::Table`] trait with a [`table::MemoryTable`] double
//! - **Resolver**: [`resolver::resolve`] reconstructs Track/Workstream
//!   ancestry and the sibling Milestone list for a target row
//! - **Publishing**: [`publish::write_summary`] writes a leadership summary
//!   back into the sheet
//! - **Seams**: [`notes::NotesSource`] for the notes-document collaborator

#![deny(unsafe_code)]

pub mod errors;
pub mod model;
pub mod notes;
pub mod publish;
pub mod resolver;
pub mod table;

pub use errors::{NotesError, ResolveError, SummaryError, TableError};
pub use model::{Context, Milestone, REQUIRED_COLUMNS, Update, WorkType, validate_schema};
pub use notes::NotesSource;
pub use publish::write_summary;
pub use resolver::resolve;
pub use table::{MemoryTable, Row, Table};
