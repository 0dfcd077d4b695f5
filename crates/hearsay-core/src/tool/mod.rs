//! Callable tool functions for the agent layer.

pub mod function;
pub mod registry;

pub use function::{BoxTool, Tool};
pub use registry::ToolRegistry;
