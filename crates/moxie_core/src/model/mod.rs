//! Domain model for moxie notes.
//!
//! # Responsibility
//! - Define the single `Note` entity and its unsaved input form.
//!
//! # Invariants
//! - Note identity is an integer assigned by storage, never by callers.

pub mod note;
