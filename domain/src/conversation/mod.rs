//! Conversation domain module
//!
//! A [`Conversation`] is the ordered, append-only list of [`Turn`]s a loop
//! sends to the model on every call. It is owned by exactly one running loop
//! and never shared.

pub mod entities;

pub use entities::{Conversation, Role, Turn};
