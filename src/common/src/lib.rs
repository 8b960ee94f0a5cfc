//! Shared data types for Konsoli.
//!
//! Colors, screen cells and keyboard events are used by the kernel core and by
//! anything that wants to inspect console or decoder state.

#![no_std]

pub mod color;
pub mod error;
pub mod key;

pub use color::{Attribute, Cell, Color};
pub use error::ConsoleError;
pub use key::{Key, KeyEvent, Modifiers};
