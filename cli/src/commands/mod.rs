//! Command implementations

pub mod activate;
pub mod add;
pub mod delete;
pub mod kill;
pub mod list;
pub mod start;
