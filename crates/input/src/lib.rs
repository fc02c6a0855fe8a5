//! Terminal input for the terminal renderer backends.
//!
//! Maps `crossterm` events onto the host's [`Event`](crate::types::Event)
//! vocabulary. Independent of any drawing code so every terminal backend
//! shares one key map.

pub mod map;

pub use arcade_types as types;

pub use map::{map_key, map_terminal_event, should_quit};
