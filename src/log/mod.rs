//! Agent session log decoding and rendering.
//!
//! A session log is a growing list of `data: {json}` lines, each holding one
//! chat completion chunk. [`LogRenderer`] prints a batch of lines;
//! [`Follower`] polls a log and feeds it only what is new.

mod diff;
mod entry;
mod follow;
mod generic;
mod render;
mod tools;

pub use diff::diff;
pub use entry::{ChatCompletionChunkEntry, Choice, Delta, FunctionCall, ToolCall};
pub use follow::{decode_snapshot, Follower};
pub use generic::generic_tool_title;
pub use render::LogRenderer;
pub use tools::{render_tool_call, Block, ToolView, TOOL_HANDLERS};
