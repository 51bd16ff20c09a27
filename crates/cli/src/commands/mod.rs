//! CLI subcommands.

pub mod chat;
pub mod ideas;
pub mod init;
pub mod rag;
pub mod runtime;
pub mod status;
pub mod tools;
pub mod workflow;
