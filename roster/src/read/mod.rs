//! Read models derived from the canonical collection.

pub mod user;
