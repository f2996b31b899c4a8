//! Android-side tools for the findeasy app
//!
//! This crate provides:
//! - The install bridge answering the app's platform-channel calls
//! - The Gradle Java-version fix for hosted Flutter plugins

pub mod bridge;
pub mod gradle_fix;
