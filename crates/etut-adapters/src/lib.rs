//! Etut adapters - Infrastructure implementations
//!
//! This crate contains concrete implementations of the ports defined in
//! etut-core: the ledger exporters producing shareable artifacts, and the
//! testing doubles used by other crates' tests.

pub mod export;
pub mod testing;

pub use export::{JsonLedgerExporter, MarkdownLedgerExporter};
pub use testing::FailingExporter;
