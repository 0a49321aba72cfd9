#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`StripCommander`**: Applies JSON commands to the strip and runs the cooperative tick loop
//! - **`Command`**: Closed tagged variant over the supported command payloads
//! - **`PixelStrip`**: Fixed-length pixel buffer with clear/set/shift/show operations
//! - **`AnimationEngine`**: Three-oscillator color mixer producing the traveling-light effect
//! - **`PersistedCommand`**: Debounced single-record persistence of the last command
//! - **`StripDriver`**: Trait to implement for your LED strip transport
//! - **`CommandStore`**: Trait to implement for your durable storage
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are `palette::Srgb<u8>` throughout the buffer; the HSV command
//! path and the animation run through a fixed gamma lookup table before
//! landing in the buffer, the RGB command path deliberately does not.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod animation;
pub mod color;
pub mod command;
pub mod controller;
pub mod persist;
pub mod strip;
pub mod time;

pub use animation::AnimationEngine;
pub use color::GammaTable;
pub use command::{Command, CommandError, DEFAULT_COMMAND};
pub use controller::{DisplayMode, StripCommander, TICK_INTERVAL_MS};
pub use persist::{CommandStore, IDLE_FLUSH_MS, MAX_COMMAND_LEN, PersistedCommand, StorageError};
pub use strip::{PixelStrip, ShowError, StripDriver};
pub use time::{TimeDuration, TimeInstant, TimeSource};
