//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the dashboard operations as tools for AI assistants. Every tool
//! takes the project directory, loads its config and reads the store fresh.
//!
//! ## Module Structure
//!
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod server;
pub mod types;

pub use server::{I18nBoardMcpServer, run_server};
