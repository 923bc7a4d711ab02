//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: model identifier sent with every completion request
//! - [`provider::Provider`]: chat completion providers with their defaults
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod provider;
