//! The command interpreter and cooperative tick loop glue.
//!
//! [`StripCommander`] owns the pixel buffer, the animation engine and the
//! persistence manager, plus the single mode flag that decides whether the
//! strip shows a static color or the running animation. The transport layer
//! (a websocket in the reference deployment) feeds raw payloads into
//! [`apply`](StripCommander::apply); the scheduler calls
//! [`tick`](StripCommander::tick) once per iteration.
//!
//! Everything runs on one cooperative loop, so no locking happens here. A
//! port to a preemptive environment must serialize access to the whole
//! commander behind one mutual-exclusion boundary; interleaving a command
//! with a mid-shift animation tick would corrupt the visible frame.

use palette::Srgb;

use crate::animation::AnimationEngine;
use crate::color::{self, GammaTable};
use crate::command::{Command, CommandError, DEFAULT_COMMAND};
use crate::persist::{CommandStore, PersistedCommand, MAX_COMMAND_LEN};
use crate::strip::{PixelStrip, StripDriver};
use crate::time::{TimeInstant, TimeSource};

/// Pace for the cooperative loop, in milliseconds (~50 ticks per second).
/// The library never sleeps; callers delay between [`StripCommander::tick`]
/// invocations.
pub const TICK_INTERVAL_MS: u64 = 20;

/// Selects what drives the strip. Exactly one of the two is active; the
/// flag only changes as a side effect of commands, never of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// The strip holds the last commanded solid color.
    Static,
    /// The animation engine repaints the strip every tick.
    Animation,
}

/// Drives an addressable LED strip from JSON commands, with the last
/// accepted command persisted across power loss.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `L` - Strip driver implementation
/// * `S` - Durable command store implementation
/// * `T` - Time source implementation
/// * `N` - Number of pixels on the strip
pub struct StripCommander<'t, I, L, S, T, const N: usize>
where
    I: TimeInstant,
    L: StripDriver,
    S: CommandStore,
    T: TimeSource<I>,
{
    strip: PixelStrip<L, N>,
    engine: AnimationEngine,
    persist: PersistedCommand<S, I>,
    gamma: GammaTable,
    mode: DisplayMode,
    time_source: &'t T,
}

impl<'t, I, L, S, T, const N: usize> StripCommander<'t, I, L, S, T, N>
where
    I: TimeInstant,
    L: StripDriver,
    S: CommandStore,
    T: TimeSource<I>,
{
    /// Creates a commander in static mode with the strip dark.
    pub fn new(driver: L, store: S, time_source: &'t T) -> Self {
        Self {
            strip: PixelStrip::new(driver),
            engine: AnimationEngine::new(),
            persist: PersistedCommand::new(store),
            gamma: GammaTable::new(),
            mode: DisplayMode::Static,
            time_source,
        }
    }

    /// Parses and applies one raw command payload.
    ///
    /// Side effects happen synchronously within the call: the pixel buffer
    /// and/or mode flag are updated, and the raw payload is handed to the
    /// persistence manager stamped with the current time. Persistence is
    /// noted even for unknown-tag no-ops - only parse failures are excluded,
    /// since "last raw payload" is worth retaining even when it triggered no
    /// visible effect.
    ///
    /// A busy strip driver is not an error: the color change is computed
    /// into the buffer but not shown, with no retry for that command.
    ///
    /// # Errors
    /// * `ParseFailure` - malformed payload; no state changed, nothing noted
    pub fn apply(&mut self, raw: &[u8]) -> Result<(), CommandError> {
        if let Some(command) = Command::parse(raw)? {
            self.execute(command);
        }
        self.persist.note(raw, self.time_source.now());
        Ok(())
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::SetAllHsv { h, s, v } => {
                let corrected = self.gamma.correct(color::quantize(color::hsv(h, s, v)));
                self.strip.clear_to(corrected);
                let _ = self.strip.show();
                self.mode = DisplayMode::Static;
            }
            Command::SetAllRgb { r, g, b } => {
                // This path intentionally skips gamma correction. Clients
                // have calibrated against the raw values; flagged for
                // product review, do not unify with the HSV path silently.
                self.strip.clear_to(Srgb::new(r, g, b));
                let _ = self.strip.show();
                self.mode = DisplayMode::Static;
            }
            Command::StartAnimation => {
                // Phase accumulators keep their running values, so the
                // animation resumes mid-mix after a static interlude.
                self.mode = DisplayMode::Animation;
            }
        }
    }

    /// Runs one cooperative scheduler iteration: the persistence idle-check,
    /// then one animation frame when animation mode is active.
    ///
    /// When the driver is mid-transmission the frame commit is skipped
    /// without blocking; the phases advance regardless, so a stalled display
    /// never stalls the animation clock.
    pub fn tick(&mut self) {
        let now = self.time_source.now();
        self.persist.flush_if_idle(now);

        if self.mode == DisplayMode::Animation {
            let mixed = self.engine.advance();
            self.strip.set_pixel(0, self.gamma.correct(mixed));
            self.strip.shift_right(1);
            let _ = self.strip.show();
        }
    }

    /// Restores the last persisted command, or installs the default.
    ///
    /// Run once at startup. A missing or unreadable record falls back to
    /// writing and applying [`DEFAULT_COMMAND`]; storage failures are never
    /// fatal to boot. The replayed payload does not re-arm the debounce -
    /// the record on flash already matches what was just applied.
    ///
    /// # Errors
    /// * `ParseFailure` - the stored record was corrupt; the strip is left
    ///   dark and the record untouched, matching a plain failed command
    pub fn restore(&mut self) -> Result<(), CommandError> {
        let mut buf = [0u8; MAX_COMMAND_LEN];
        let result = match self.persist.load(&mut buf) {
            Ok(Some(len)) => self.apply(&buf[..len]),
            Ok(None) | Err(_) => {
                // First boot, or storage transiently unreadable: seed the
                // record with the default color (best effort) and show it.
                let _ = self.persist.save_now(DEFAULT_COMMAND);
                self.apply(DEFAULT_COMMAND)
            }
        };
        self.persist.mark_clean();
        result
    }

    /// The active display mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The logical pixel buffer.
    pub fn strip(&self) -> &PixelStrip<L, N> {
        &self.strip
    }

    /// Mutable access to the pixel buffer (and through it, the driver).
    pub fn strip_mut(&mut self) -> &mut PixelStrip<L, N> {
        &mut self.strip
    }

    /// The animation engine's phase state.
    pub fn animation(&self) -> &AnimationEngine {
        &self.engine
    }

    /// The gamma table used for the HSV and animation paths.
    pub fn gamma(&self) -> &GammaTable {
        &self.gamma
    }

    /// True when a command is buffered awaiting its idle flush.
    pub fn persist_pending(&self) -> bool {
        self.persist.is_dirty()
    }
}
