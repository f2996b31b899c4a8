//! iOS-side tools for the findeasy app
//!
//! This crate patches vendored iOS sources before a build:
//! - SDWebImage HDR handling in `ios/Pods`
//! - `record_darwin` audio session configuration in the pub cache

pub mod pods_fix;
pub mod record_config;
