//! Name-to-tool registry.
//!
//! The agent resolves tool calls by name against this map. Registration
//! happens once at startup, driven by the agent config's `tools:` list.

use hearsay_types::error::ToolError;

use std::collections::HashMap;
use std::fmt;

use super::function::{BoxTool, Tool};

/// Registry of callable tool functions, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, BoxTool>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    ///
    /// Registering a second tool with the same name replaces the first.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let boxed = BoxTool::new(tool);
        self.tools.insert(boxed.name(), boxed);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&BoxTool> {
        self.tools.get(name)
    }

    /// Invoke a tool by name.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;
        tool.call(args).await
    }

    /// Names of all registered tools, sorted for stable output.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    impl Tool for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "returns its arguments unchanged"
        }

        async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
            Ok(args)
        }
    }

    struct FailTool;

    impl Tool for FailTool {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn description(&self) -> &'static str {
            "always errors"
        }

        async fn call(&self, _args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
            Err(ToolError::BadArgs("nope".to_string()))
        }
    }

    #[tokio::test]
    async fn test_register_and_call() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let result = registry.call("echo", json!({"q": "hi"})).await.unwrap();
        assert_eq!(result, json!({"q": "hi"}));
    }

    #[tokio::test]
    async fn test_unknown_tool_errors() {
        let registry = ToolRegistry::new();
        let err = registry.call("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Unknown(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_tool_errors_pass_through() {
        let mut registry = ToolRegistry::new();
        registry.register(FailTool);
        let err = registry.call("fail", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::BadArgs(_)));
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(FailTool);
        registry.register(EchoTool);
        assert_eq!(registry.names(), vec!["echo", "fail"]);
        assert_eq!(registry.len(), 2);
    }
}
