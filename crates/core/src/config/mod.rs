//! Configuration loading and schema definitions
//!
//! Shared configuration types used by both patchers.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
