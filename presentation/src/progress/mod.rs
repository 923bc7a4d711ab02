//! Progress display for running loops

pub mod reporter;
