//! Record persistence (one JSON file per record) and report forwarding.
//!
//! Reports and users live in sibling directories under the data dir, keyed by
//! their numeric id. Forwarded reports are written as plain-text messages to
//! the outbox directory.

mod error;
mod forward;
mod store;

pub use error::StorageError;
pub use forward::{format_forward, recipients};
pub use store::{Record, Store};
