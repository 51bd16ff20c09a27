//! The agent layer of ragent.
//!
//! [`DispatchLoop`] drives a conversation through the model until it stops,
//! executing every tool call the model asks for along the way.
//! [`RagAgent`] grounds a single question on retrieved knowledge before
//! handing it to the loop.

pub mod assembler;
pub mod dispatch;
pub mod rag;

#[cfg(test)]
mod test_helpers;

pub use dispatch::{DEFAULT_MAX_ITERATIONS, DispatchLoop, LoopState};
pub use rag::{RagAgent, RagAnswer};
