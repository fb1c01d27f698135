//! These models represent the objects passed between the agent, the chat endpoint
//! and the local tools.
//!
//! The wire formats (ollama's `/api/chat` json) are converted to and from these
//! structs at the provider boundary, see `providers::utils`. Nothing outside of the
//! providers should need to touch raw json.
pub mod completion;
pub mod conversation;
pub mod message;
pub mod role;
pub mod tool;
