// Document-store access layer
//
// The job collection is a schemaless document store addressed by opaque
// string ids. Everything above this module goes through the JobCollection
// trait; the Postgres and in-memory implementations live here.

pub mod collection;
pub mod error;
pub mod memory;
pub mod postgres;

pub use collection::{new_document_id, JobCollection, RawJob};
pub use error::StoreError;
pub use memory::MemoryCollection;
pub use postgres::PgCollection;
