//! JMA weather forecast tool, served over MCP (stdio or streamable HTTP) and a
//! JSON-RPC shim.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod forecast;
pub mod infra;
pub mod tools;
