//! Tool trait and its object-safe boxed wrapper.
//!
//! `Tool` uses RPITIT and therefore cannot be a trait object directly;
//! `BoxTool` provides the dynamic-dispatch form the registry holds:
//! 1. an object-safe `ToolDyn` trait with boxed futures,
//! 2. a blanket impl of `ToolDyn` for every `T: Tool`,
//! 3. `BoxTool` wrapping `Box<dyn ToolDyn>` and delegating.

use hearsay_types::error::ToolError;

use std::future::Future;
use std::pin::Pin;

/// A callable function the agent may invoke mid-conversation.
///
/// Arguments and results are JSON values; each tool documents its own
/// shape. Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait Tool: Send + Sync {
    /// Registry name, as referenced from the agent config `tools:` list.
    fn name(&self) -> &'static str;

    /// One-line description surfaced to the agent.
    fn description(&self) -> &'static str;

    /// Invoke the tool.
    fn call(
        &self,
        args: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, ToolError>> + Send;
}

/// Object-safe version of [`Tool`] with boxed futures.
///
/// Exists solely to enable dynamic dispatch; a blanket implementation
/// covers every type implementing `Tool`.
trait ToolDyn: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn call_boxed(
        &self,
        args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ToolError>> + Send + '_>>;
}

impl<T: Tool> ToolDyn for T {
    fn name(&self) -> &'static str {
        Tool::name(self)
    }

    fn description(&self) -> &'static str {
        Tool::description(self)
    }

    fn call_boxed(
        &self,
        args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ToolError>> + Send + '_>> {
        Box::pin(self.call(args))
    }
}

/// Type-erased tool for runtime selection out of the registry.
pub struct BoxTool {
    inner: Box<dyn ToolDyn>,
}

impl BoxTool {
    /// Wrap a concrete [`Tool`] in a type-erased box.
    pub fn new<T: Tool + 'static>(tool: T) -> Self {
        Self {
            inner: Box::new(tool),
        }
    }

    /// Registry name of the wrapped tool.
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// One-line description of the wrapped tool.
    pub fn description(&self) -> &'static str {
        self.inner.description()
    }

    /// Invoke the wrapped tool.
    pub async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        self.inner.call_boxed(args).await
    }
}
