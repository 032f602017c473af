//! Core data types: records, collections and key indices.

mod index;
mod record;

pub use index::{Index, index, record_key};
pub use record::{Collection, Record, URL_FIELD};
