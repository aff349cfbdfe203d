//! Interactive session.
//!
//! A prompt-driven loop for adding, listing and editing tasks without
//! retyping the binary name for every command.

mod repl;

pub use repl::{ListScope, Repl, ReplCommand};
