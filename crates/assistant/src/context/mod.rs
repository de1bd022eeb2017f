//! History context assembly.
//!
//! The full mood and journal history is embedded on every request. Nothing
//! is trimmed; the token estimate only makes the growth visible in logs.

pub mod assembler;
pub mod token;

pub use assembler::{AssembledContext, ContextAssembler, PERSONA};
