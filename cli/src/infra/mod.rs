//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution,
//! filesystem access, and process environment set-up.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod bootstrap;
pub mod command_runner;
pub mod fs;

pub use command_runner::StdCommandRunner;
pub use fs::{LocalFs, ProcessTempDirs};
