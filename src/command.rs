//! Command payload parsing.
//!
//! A command is a single self-contained JSON document with a `cmd` string
//! field selecting the operation and flat command-specific fields:
//!
//! ```json
//! {"cmd":"setAllHSV","h":0.129,"s":0.549,"v":1}
//! {"cmd":"setAllRGB","r":255,"g":0,"b":0}
//! {"cmd":"startAnimation"}
//! ```
//!
//! The wire struct keeps every field flat and optional instead of using an
//! internally tagged enum, which serde-json-core cannot deserialize without
//! an allocator.

use serde::Deserialize;

/// The payload written to durable storage on first boot, before any client
/// has ever sent a command.
pub const DEFAULT_COMMAND: &[u8] = br#"{"cmd":"setAllHSV","h":0.129,"s":0.549,"v":1}"#;

/// A validated, typed command. Immutable once constructed; the variant and
/// its fields are the command's full identity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Fill the whole strip with a gamma-corrected HSV color and switch to
    /// static display. Hue is in turns (0.0-1.0).
    SetAllHsv { h: f32, s: f32, v: f32 },
    /// Fill the whole strip with a raw RGB color and switch to static
    /// display. No gamma correction on this path.
    SetAllRgb { r: u8, g: u8, b: u8 },
    /// Switch to animation mode. Carries no fields and does not reset the
    /// animation phase accumulators.
    StartAnimation,
}

/// Errors from command parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// The payload was not well-formed JSON. No state was changed and the
    /// payload is not persisted.
    ParseFailure,
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::ParseFailure => write!(f, "malformed command payload"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

/// Raw wire representation. All fields optional so that one struct covers
/// every command shape; missing numeric fields default to zero, matching
/// the behavior clients have come to rely on.
#[derive(Deserialize)]
struct CommandFrame<'a> {
    #[serde(default, borrow)]
    cmd: Option<&'a str>,
    #[serde(default)]
    h: Option<f32>,
    #[serde(default)]
    s: Option<f32>,
    #[serde(default)]
    v: Option<f32>,
    #[serde(default)]
    r: Option<i32>,
    #[serde(default)]
    g: Option<i32>,
    #[serde(default)]
    b: Option<i32>,
}

impl Command {
    /// Parses a raw payload into a typed command.
    ///
    /// # Returns
    /// * `Ok(Some(command))` - recognized command
    /// * `Ok(None)` - well-formed JSON with a missing or unrecognized `cmd`
    ///   tag; a deliberate no-op rather than an error, so a stray frame
    ///   never disturbs the visible LED state
    /// * `Err(ParseFailure)` - malformed JSON
    ///
    /// HSV fields are read as floats with no range validation; out-of-range
    /// values pass through to color conversion, which saturates. RGB fields
    /// are read as integers and saturated into 0-255. Known-loose on
    /// purpose; see the crate documentation.
    pub fn parse(payload: &[u8]) -> Result<Option<Command>, CommandError> {
        let (frame, _len): (CommandFrame, usize) =
            serde_json_core::from_slice(payload).map_err(|_| CommandError::ParseFailure)?;

        Ok(match frame.cmd {
            Some("setAllHSV") => Some(Command::SetAllHsv {
                h: frame.h.unwrap_or(0.0),
                s: frame.s.unwrap_or(0.0),
                v: frame.v.unwrap_or(0.0),
            }),
            Some("setAllRGB") => Some(Command::SetAllRgb {
                r: saturate(frame.r.unwrap_or(0)),
                g: saturate(frame.g.unwrap_or(0)),
                b: saturate(frame.b.unwrap_or(0)),
            }),
            Some("startAnimation") => Some(Command::StartAnimation),
            _ => None,
        })
    }
}

#[inline]
fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
