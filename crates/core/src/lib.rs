//! # MindNest Core
//!
//! Domain types, traits, and error definitions for the MindNest well-being
//! companion. This crate has **no backend dependencies**: it defines the
//! record model and the seams (record store, completion client) that the
//! other crates implement against.
//!
//! Every external dependency is a trait here, so tests can inject in-memory
//! stores and scripted completion clients instead of touching disk or
//! network.

pub mod completion;
pub mod error;
pub mod message;
pub mod record;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use completion::CompletionClient;
pub use error::{CompletionError, Error, Result, StorageError, ValidationError};
pub use message::{ConversationMessage, Role};
pub use record::{AgeGroup, Gender, JournalEntry, Mood, MoodEntry, Profile, ProfileDraft};
pub use store::{RecordStore, keys};
