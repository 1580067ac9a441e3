/// MCP tools for habit management
///
/// Each tool takes deserialized parameters, calls into the habit store, and
/// returns a serializable response with a human-readable message.

pub mod calendar;
pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod stats;
pub mod toggle;

// Re-export tool functions for easy access
pub use calendar::*;
pub use create::*;
pub use delete::*;
pub use export::*;
pub use list::*;
pub use stats::*;
pub use toggle::*;
