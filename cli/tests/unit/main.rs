//! Unit tests for sshkey-agent
//!
//! These tests use mocked dependencies and run fast without spawning processes.
