//! Core utilities for the findeasy maintenance tools
//!
//! This crate provides the functionality shared by the Android and iOS patchers:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with conventional defaults
//! - **Pub cache**: Discovery of hosted Flutter packages by name prefix
//! - **Patching**: Idempotent, rule-based rewriting of dependency source files
//!
//! # Example
//!
//! ```rust,no_run
//! use findeasy_core::pub_cache::PubCache;
//!
//! let cache = PubCache::new("/home/me/.pub-cache");
//! let packages = cache.find_packages(&["path_provider_android"]).expect("cache readable");
//! for pkg in packages {
//!     println!("{}", pkg.name);
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod patch;
pub mod pub_cache;

pub use error::{Error, ErrorCode, Result, ResultExt};

