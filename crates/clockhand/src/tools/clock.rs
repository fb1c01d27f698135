use async_trait::async_trait;
use chrono::{Local, NaiveTime};
use serde_json::{json, Value};

use super::ToolExecutor;
use crate::errors::{AgentError, AgentResult};
use crate::models::tool::Tool;

pub const GET_CURRENT_TIME: &str = "get_current_time";

type TimeSource = Box<dyn Fn() -> NaiveTime + Send + Sync>;

/// Reports the local wall-clock time as `HH:MM:SS`
pub struct ClockTool {
    tool: Tool,
    now: TimeSource,
}

impl ClockTool {
    pub fn new() -> Self {
        Self::with_time_source(|| Local::now().time())
    }

    /// Read the time from `now` instead of the system clock
    pub fn with_time_source<F>(now: F) -> Self
    where
        F: Fn() -> NaiveTime + Send + Sync + 'static,
    {
        Self {
            tool: Tool::new(
                GET_CURRENT_TIME,
                "Get the current time",
                json!({"type": "object", "properties": {}}),
            ),
            now: Box::new(now),
        }
    }
}

impl Default for ClockTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ClockTool {
    fn tool(&self) -> &Tool {
        &self.tool
    }

    async fn call(&self, arguments: &Value) -> AgentResult<String> {
        // accepts `{}` or no arguments at all
        if !(arguments.is_null() || arguments.is_object()) {
            return Err(AgentError::InvalidParameters(format!(
                "{} takes no arguments, got {}",
                GET_CURRENT_TIME, arguments
            )));
        }
        Ok((self.now)().format("%H:%M:%S").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_clock() -> ClockTool {
        ClockTool::with_time_source(|| NaiveTime::from_hms_opt(14, 5, 9).unwrap())
    }

    #[test]
    fn test_descriptor() {
        let clock = ClockTool::new();
        assert_eq!(clock.tool().name, "get_current_time");
        assert_eq!(clock.tool().description, "Get the current time");
        assert_eq!(clock.tool().parameters, json!({"type": "object", "properties": {}}));
    }

    #[tokio::test]
    async fn test_formats_time_with_zero_padding() {
        let result = fixed_clock().call(&json!({})).await.unwrap();
        assert_eq!(result, "14:05:09");

        let result = fixed_clock().call(&Value::Null).await.unwrap();
        assert_eq!(result, "14:05:09");
    }

    #[tokio::test]
    async fn test_system_clock_shape() {
        let result = ClockTool::new().call(&json!({})).await.unwrap();
        assert!(NaiveTime::parse_from_str(&result, "%H:%M:%S").is_ok());
    }

    #[tokio::test]
    async fn test_rejects_non_object_arguments() {
        let err = fixed_clock().call(&json!(["now"])).await.unwrap_err();
        assert!(matches!(err, AgentError::InvalidParameters(_)));
    }
}
