//! Common types and utilities for the symres symbol resolver.
//!
//! This crate provides foundational pieces used by the resolver crate:
//! - Symbol name helpers (`NAMESPACE_SEPARATOR`, `split_namespace`, ...)
//! - Logical path translation for the hierarchical and legacy conventions
//! - Registration errors
//! - Centralized defaults (extension, environment variable names)

// Symbol name helpers
pub mod names;
pub use names::{LEGACY_SEPARATOR, NAMESPACE_SEPARATOR};

// Symbol name -> relative file path translation
pub mod logical_path;
pub use logical_path::{join_logical, psr0_logical_path, psr4_logical_path, psr4_tail};

// Registration errors
pub mod errors;
pub use errors::RegistrationError;

// Centralized defaults
pub mod limits;
