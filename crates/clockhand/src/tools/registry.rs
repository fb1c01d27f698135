use super::ToolExecutor;
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::{Tool, ToolCall};

/// Local tool executors, resolved by exact tool name
#[derive(Default)]
pub struct ToolRegistry {
    executors: Vec<Box<dyn ToolExecutor>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an executor, refusing a second tool with the same name
    pub fn register(&mut self, executor: Box<dyn ToolExecutor>) -> AgentResult<()> {
        let name = &executor.tool().name;
        if self.get(name).is_some() {
            return Err(AgentError::DuplicateTool(name.clone()));
        }
        self.executors.push(executor);
        Ok(())
    }

    /// The descriptors of every registered tool, in registration order
    pub fn catalog(&self) -> Vec<Tool> {
        self.executors.iter().map(|e| e.tool().clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolExecutor> {
        self.executors
            .iter()
            .find(|executor| executor.tool().name == name)
            .map(|v| &**v)
    }

    /// Run the executor named by the call
    pub async fn dispatch(&self, call: &ToolCall) -> AgentResult<String> {
        let executor = self
            .get(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;
        executor.call(&call.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ClockTool;
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use serde_json::{json, Value};

    struct EchoTool {
        tool: Tool,
    }

    impl EchoTool {
        fn new() -> Self {
            Self {
                tool: Tool::new(
                    "echo",
                    "Echoes back the input",
                    json!({
                        "type": "object",
                        "properties": {"message": {"type": "string"}},
                        "required": ["message"]
                    }),
                ),
            }
        }
    }

    #[async_trait]
    impl ToolExecutor for EchoTool {
        fn tool(&self) -> &Tool {
            &self.tool
        }

        async fn call(&self, arguments: &Value) -> AgentResult<String> {
            arguments["message"]
                .as_str()
                .map(String::from)
                .ok_or_else(|| AgentError::InvalidParameters("message is required".to_string()))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(Box::new(ClockTool::with_time_source(|| {
                NaiveTime::from_hms_opt(9, 0, 0).unwrap()
            })))
            .unwrap();
        registry.register(Box::new(EchoTool::new())).unwrap();
        registry
    }

    #[test]
    fn test_catalog_in_registration_order() {
        let names: Vec<String> = registry().catalog().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["get_current_time", "echo"]);
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = registry();
        let err = registry.register(Box::new(EchoTool::new())).unwrap_err();
        assert_eq!(err, AgentError::DuplicateTool("echo".to_string()));
        assert_eq!(registry.catalog().len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_by_exact_name() {
        let registry = registry();

        let time = registry
            .dispatch(&ToolCall::new("get_current_time", json!({})))
            .await
            .unwrap();
        assert_eq!(time, "09:00:00");

        let echoed = registry
            .dispatch(&ToolCall::new("echo", json!({"message": "hi"})))
            .await
            .unwrap();
        assert_eq!(echoed, "hi");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let err = registry()
            .dispatch(&ToolCall::new("Get_Current_Time", json!({})))
            .await
            .unwrap_err();
        assert_eq!(err, AgentError::ToolNotFound("Get_Current_Time".to_string()));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.catalog().is_empty());
        assert!(registry.get("get_current_time").is_none());
    }
}
