//! CLI command implementations

pub mod build;
pub mod fetch_bin;
pub mod resolve;

pub use build::execute as build;
pub use fetch_bin::execute as fetch_bin;
pub use resolve::execute as resolve;
