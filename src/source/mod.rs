//! Input document discovery

pub mod discovery;

pub use discovery::{discover_pdfs, Document};
