//! Operations module
//!
//! Coordinates installing, renaming, listing and opening snippets

pub mod install;
pub mod listing;
pub mod manager;
pub mod open;
pub mod rename;
pub mod staging;

pub use install::*;
pub use listing::*;
pub use manager::*;
pub use open::*;
pub use rename::*;
pub use staging::*;
