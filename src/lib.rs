//! i18nboard - translation dashboard for JSON i18n files
//!
//! i18nboard keeps per-language JSON translation files in a blob store, finds
//! missing translations and missing or empty fields across languages, and
//! manages files (create, rename, upload, AI-generate) from a CLI or an MCP
//! server.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and overrides
//! - `core`: Pure logic: JSON helpers, gap analysis, session state
//! - `dashboard`: User-facing operations with typed failures
//! - `logging`: Tracing subscriber setup
//! - `mcp`: Model Context Protocol server implementation
//! - `repository`: Bulk load and persistence with bounded concurrency
//! - `store`: Blob store trait and backends
//! - `translate`: AI translation collaborator

pub mod cli;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod logging;
pub mod mcp;
pub mod repository;
pub mod store;
pub mod translate;
