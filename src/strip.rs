//! Pixel buffer and the hardware seam to the physical strip.
//!
//! [`PixelStrip`] owns the logical frame: a fixed-length ordered sequence of
//! 8-bit RGB cells. The actual transmission to the LEDs happens through the
//! [`StripDriver`] trait, which models the timing-sensitive hardware as a
//! non-blocking resource: callers check [`PixelStrip::can_show`] and get
//! [`ShowError::Busy`] instead of ever waiting on a transfer in flight.

use palette::Srgb;

/// Trait for abstracting the physical LED strip transport.
///
/// Implement this for your hardware (RMT, DMA, UART bit-banging, etc.).
pub trait StripDriver {
    /// Returns true when the driver can accept a new frame. Must not block.
    ///
    /// WS2812-class strips latch on a quiet period, so a frame pushed while
    /// a previous transmission is still in flight corrupts the output.
    fn can_show(&self) -> bool;

    /// Pushes one full frame to the strip.
    ///
    /// Only called after `can_show` returned true. Handle any hardware
    /// errors internally - this method cannot fail.
    fn write(&mut self, pixels: &[Srgb<u8>]);
}

/// Errors from committing the pixel buffer to hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShowError {
    /// A previous transmission is still in flight. The frame stays in the
    /// buffer; the caller decides whether to retry on a later tick.
    Busy,
}

impl core::fmt::Display for ShowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShowError::Busy => write!(f, "strip transmission in flight"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShowError {}

/// A fixed-length pixel buffer in front of a [`StripDriver`].
///
/// The length is fixed at construction and never resized. Mutations only go
/// through the operations below; [`show`](PixelStrip::show) commits the
/// whole frame atomically relative to the tick that mutated it.
///
/// # Type Parameters
/// * `L` - Strip driver implementation
/// * `N` - Number of pixels on the physical strip
pub struct PixelStrip<L: StripDriver, const N: usize> {
    pixels: [Srgb<u8>; N],
    driver: L,
}

impl<L: StripDriver, const N: usize> PixelStrip<L, N> {
    /// Creates a strip with every pixel off.
    pub fn new(driver: L) -> Self {
        Self {
            pixels: [Srgb::new(0, 0, 0); N],
            driver,
        }
    }

    /// Number of pixels in the buffer.
    pub const fn len(&self) -> usize {
        N
    }

    /// True when the strip has zero pixels.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Sets every pixel to the same color.
    pub fn clear_to(&mut self, color: Srgb<u8>) {
        self.pixels.fill(color);
    }

    /// Sets a single pixel. Out-of-range indices are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Srgb<u8>) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// Returns the color stored at `index`, if in range.
    pub fn pixel(&self, index: usize) -> Option<Srgb<u8>> {
        self.pixels.get(index).copied()
    }

    /// The whole logical frame, in strip order.
    pub fn pixels(&self) -> &[Srgb<u8>] {
        &self.pixels
    }

    /// Moves every pixel's color to the next `n` higher index.
    ///
    /// This is a shift, not a rotate: the colors previously stored in the
    /// trailing `n` pixels are discarded, and the leading `n` entries keep
    /// their old values until the caller rewrites them. Shifting by the
    /// buffer length or more leaves the buffer unchanged.
    pub fn shift_right(&mut self, n: usize) {
        if n == 0 || n >= N {
            return;
        }
        self.pixels.copy_within(0..N - n, n);
    }

    /// Returns true when the driver can accept a new frame. Must be checked
    /// before [`show`](PixelStrip::show) by callers that want to avoid the
    /// `Busy` path entirely.
    pub fn can_show(&self) -> bool {
        self.driver.can_show()
    }

    /// Commits the buffer to hardware.
    ///
    /// # Errors
    /// * `Busy` - a previous transmission is in flight; nothing was pushed
    pub fn show(&mut self) -> Result<(), ShowError> {
        if !self.driver.can_show() {
            return Err(ShowError::Busy);
        }
        self.driver.write(&self.pixels);
        Ok(())
    }

    /// Access to the underlying driver.
    pub fn driver(&self) -> &L {
        &self.driver
    }

    /// Mutable access to the underlying driver (e.g. to flip a mock's busy
    /// flag).
    pub fn driver_mut(&mut self) -> &mut L {
        &mut self.driver
    }
}
