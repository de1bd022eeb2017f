//! Completion client implementations for MindNest.
//!
//! All clients implement the `mindnest_core::CompletionClient` trait.

pub mod chat_completion;

pub use chat_completion::ChatCompletionClient;
