//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.
//! Values that balance passes tend to touch are also exposed through
//! [`crate::config::Rules`], which uses these as its defaults.

mod combat;
mod dungeon;
mod enemies;
mod gameplay;
mod items;

pub use combat::*;
pub use dungeon::*;
pub use enemies::*;
pub use gameplay::*;
pub use items::*;
