//! Browser-facing helpers
//!
//! Pure functions that turn raw DOM event data (key names, pointer
//! coordinates) into [`InputState`](crate::sim::InputState) changes, plus
//! LocalStorage access. The listeners themselves live in the binary; keeping
//! the mapping here makes it testable on native.

pub mod joystick;
pub mod keys;
pub mod storage;

pub use joystick::Joystick;
pub use keys::{KeyAction, apply_key, map_key};
pub use storage::StorageError;
