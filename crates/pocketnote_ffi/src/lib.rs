//! Host bridge crate for the PocketNote core.

pub mod api;
