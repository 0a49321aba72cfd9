//! Debounced persistence of the last accepted command.
//!
//! Durable storage holds at most one record: the raw payload of the most
//! recently accepted command, verbatim. Incoming commands only touch
//! volatile state; the record is rewritten after a quiet period, so a burst
//! of slider drags from a client UI costs zero flash writes until the input
//! settles.

use heapless::Vec;

use crate::time::{TimeDuration, TimeInstant};

/// Quiet period that must elapse after the last command before the buffered
/// payload is written to durable storage.
pub const IDLE_FLUSH_MS: u64 = 5000;

/// Capacity of the volatile payload buffer. Several times the largest legal
/// command; payloads beyond this are applied but never persisted.
pub const MAX_COMMAND_LEN: usize = 192;

/// Errors from the durable command store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The backing storage could not be reached. Transient by design: a
    /// firmware update pauses filesystem access, and flash drivers can be
    /// briefly held elsewhere.
    Unavailable,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "command store unavailable"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// Trait for abstracting the durable single-record command store.
///
/// Implement this over your flash filesystem (LittleFS, NVS, a raw flash
/// region). The store holds at most one record at a time; `save` overwrites
/// in place, never appends.
pub trait CommandStore {
    /// Reads the stored record into `buf`.
    ///
    /// Callers always pass a buffer of at least [`MAX_COMMAND_LEN`] bytes;
    /// a record that somehow outgrew the buffer should be reported as
    /// `Unavailable` rather than truncated.
    ///
    /// # Returns
    /// * `Ok(Some(len))` - record present, `len` bytes copied into `buf`
    /// * `Ok(None)` - no record has ever been written (first boot)
    /// * `Err(Unavailable)` - storage could not be read
    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, StorageError>;

    /// Overwrites the stored record with `payload`.
    fn save(&mut self, payload: &[u8]) -> Result<(), StorageError>;
}

/// Debounce buffer in front of a [`CommandStore`].
///
/// # Type Parameters
/// * `S` - Durable store implementation
/// * `I` - Time instant type
pub struct PersistedCommand<S: CommandStore, I: TimeInstant> {
    store: S,
    pending: Vec<u8, MAX_COMMAND_LEN>,
    last_note: Option<I>,
    dirty: bool,
}

impl<S: CommandStore, I: TimeInstant> PersistedCommand<S, I> {
    /// Creates a manager with nothing buffered.
    pub fn new(store: S) -> Self {
        Self {
            store,
            pending: Vec::new(),
            last_note: None,
            dirty: false,
        }
    }

    /// Buffers `raw` as the most recent accepted command.
    ///
    /// Volatile only; nothing touches durable storage here. A payload too
    /// large for the buffer is dropped silently and the previous durable
    /// record stays intact.
    pub fn note(&mut self, raw: &[u8], now: I) {
        if raw.len() > MAX_COMMAND_LEN {
            return;
        }
        self.pending.clear();
        // Length checked above, extend cannot fail
        let _ = self.pending.extend_from_slice(raw);
        self.last_note = Some(now);
        self.dirty = true;
    }

    /// Writes the buffered payload to durable storage if the quiet period
    /// has elapsed. Invoked every scheduler tick.
    ///
    /// A failed write keeps the dirty flag set, so the next quiet window
    /// retries naturally.
    pub fn flush_if_idle(&mut self, now: I) {
        if !self.dirty {
            return;
        }
        let Some(last) = self.last_note else {
            return;
        };
        if now.duration_since(last).as_millis() <= IDLE_FLUSH_MS {
            return;
        }
        if self.store.save(&self.pending).is_ok() {
            self.dirty = false;
        }
    }

    /// Reads the stored record into `buf`. Passthrough to the store.
    pub fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, StorageError> {
        self.store.load(buf)
    }

    /// Overwrites the stored record immediately, bypassing the debounce.
    /// Used for the first-boot default.
    pub fn save_now(&mut self, payload: &[u8]) -> Result<(), StorageError> {
        self.store.save(payload)
    }

    /// Clears the dirty flag without writing.
    ///
    /// Called after startup replay: the record just read back from storage
    /// does not need to be rewritten five seconds into every boot.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// True when a buffered payload is awaiting its quiet period.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
