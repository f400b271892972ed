pub mod registry;
pub mod tool_router;
pub mod weather;
