//! Local tools the agent can run on the model's behalf
//!
//! Each tool is a [`ToolExecutor`]: it advertises a [`Tool`] descriptor to the model and
//! turns a call's arguments into a textual result. Executors are looked up by exact name
//! through a [`ToolRegistry`].
pub mod clock;
pub mod registry;

pub use clock::ClockTool;
pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AgentResult;
use crate::models::tool::Tool;

/// A capability the agent can execute locally
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// The descriptor advertised to the model
    fn tool(&self) -> &Tool;

    /// Run the tool with the arguments the model supplied
    async fn call(&self, arguments: &Value) -> AgentResult<String>;
}
