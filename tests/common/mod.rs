//! Shared test infrastructure for strip-commander integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use palette::Srgb;
use strip_commander::{
    CommandStore, GammaTable, StorageError, StripCommander, StripDriver, TimeDuration,
    TimeInstant, TimeSource, color,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance_ms(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Strip Driver
// ============================================================================

/// Mock strip transport that records every committed frame and exposes a
/// controllable busy flag
pub struct MockStrip {
    pub busy: bool,
    pub frames: Vec<Vec<Srgb<u8>>>,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            busy: false,
            frames: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> Option<&[Srgb<u8>]> {
        self.frames.last().map(|frame| frame.as_slice())
    }
}

impl StripDriver for MockStrip {
    fn can_show(&self) -> bool {
        !self.busy
    }

    fn write(&mut self, pixels: &[Srgb<u8>]) {
        self.frames.push(pixels.to_vec());
    }
}

// ============================================================================
// Mock Command Store
// ============================================================================

#[derive(Default)]
pub struct StoreState {
    pub record: Option<Vec<u8>>,
    pub writes: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

/// In-memory command store. Clones share the same state, so a test can keep
/// a handle while the commander owns the other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(payload: &[u8]) -> Self {
        let store = Self::default();
        store.state.borrow_mut().record = Some(payload.to_vec());
        store
    }

    pub fn record(&self) -> Option<Vec<u8>> {
        self.state.borrow().record.clone()
    }

    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }
}

impl CommandStore for MemoryStore {
    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, StorageError> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(StorageError::Unavailable);
        }
        match &state.record {
            Some(record) => {
                buf[..record.len()].copy_from_slice(record);
                Ok(Some(record.len()))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, payload: &[u8]) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StorageError::Unavailable);
        }
        state.writes += 1;
        state.record = Some(payload.to_vec());
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Commander wired to all the mocks, with a short 8-pixel strip
pub type TestCommander<'t> =
    StripCommander<'t, TestInstant, MockStrip, MemoryStore, MockTimeSource, 8>;

pub fn commander(clock: &MockTimeSource, store: MemoryStore) -> TestCommander<'_> {
    StripCommander::new(MockStrip::new(), store, clock)
}

/// The gamma-corrected quantized color the HSV command path produces
pub fn gamma_hsv(h: f32, s: f32, v: f32) -> Srgb<u8> {
    GammaTable::new().correct(color::quantize(color::hsv(h, s, v)))
}

pub fn rgb(r: u8, g: u8, b: u8) -> Srgb<u8> {
    Srgb::new(r, g, b)
}
