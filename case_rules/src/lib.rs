//! # Case Rules
//!
//! The "Case Bible" crate - the static data of a case: the victim, the suspects,
//! the chapters of the case file, and the fixed solution.
//! This crate is the single source of truth for case content and does not react to the player.

pub mod case_file;
pub mod chapters;
pub mod error;
pub mod solution;
pub mod suspects;

pub use case_file::*;
pub use chapters::*;
pub use error::*;
pub use solution::*;
pub use suspects::*;
