// Job Board - API Core
//
// This crate provides the backend API for a job board: a filterable,
// paginated listing of job postings stored as schemaless documents.
//
// The document collection is reached through the trait in store/, the
// posting semantics live in domains/jobs/, and server/ is a thin HTTP
// shell over both.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;
pub mod store;

pub use config::*;
