//! Lookups between HTTP status codes and their reason phrases.
//!
//! Everything goes through a [`StatusRegistry`]. It is built once, from the
//! [IANA registry](https://www.iana.org/assignments/http-status-codes/http-status-codes.xhtml) or
//! from a table of your own, and answers lookups in both directions:
//!
//! ```
//! use statuses::{Resolved, StatusRegistry};
//!
//! let registry = StatusRegistry::new();
//!
//! assert_eq!(registry.message_for(404).unwrap(), "Not Found");
//! assert_eq!(registry.code_for("not found").unwrap(), 404);
//!
//! // `resolve` accepts either and figures out which direction to go
//! assert_eq!(registry.resolve(403).unwrap(), Resolved::Message("Forbidden"));
//! assert_eq!(registry.resolve("Forbidden").unwrap(), Resolved::Code(403));
//! ```
//!
//! The registry also classifies codes:
//!
//! ```
//! use statuses::{status, StatusRegistry};
//!
//! let registry = StatusRegistry::new();
//!
//! assert!(registry.is_redirect(status::FOUND));
//! assert!(registry.has_empty_body(status::NO_CONTENT));
//! assert!(registry.is_retryable(status::SERVICE_UNAVAILABLE));
//! ```
//!
//! The classification sets are fixed, and are also available without a registry in the
//! [`classify`] module.
//!
//! # Numbers in strings
//!
//! A string passed to [`StatusRegistry::resolve`] is treated as a status code whenever it
//! *starts* with an integer. That means `"404"`, `" 404"` and `"404 Not Found"` all resolve to
//! "Not Found". Numeric-looking strings are never looked up as reason phrases.
//!
//! Use [`RegistryConfig::strict_numbers`] if trailing characters should not be ignored:
//!
//! ```
//! use statuses::{Error, RegistryConfig};
//!
//! let registry = RegistryConfig::new().strict_numbers(true).build().unwrap();
//!
//! assert!(matches!(registry.resolve("404abc"), Err(Error::UnknownStatusMessage(_))));
//! ```
//!
//! # Logging
//!
//! This crate logs through the [`log`](https://docs.rs/log) facade. Building a registry logs at
//! `debug` level, and tables where one reason phrase maps to several codes log a `warn`ing.

pub mod classify;
mod config;
mod error;
pub mod query;
mod registry;
pub mod status;

pub use config::RegistryConfig;
pub use error::Error;
pub use query::{Query, Resolved};
pub use registry::StatusRegistry;
