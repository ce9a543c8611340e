// MCP (Model Context Protocol) server exposing the Sprout Social API as tools

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::{Overrides, ServerConfig};
pub use server::McpServer;
pub use tools::{sprout_registry, Tool, ToolRegistry};
