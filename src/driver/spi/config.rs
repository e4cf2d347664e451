use crate::config::{BITS_PER_BYTE, DEFAULT_WORD_SIZE, MAX_WORD_SIZE};
use crate::driver::gpio::GpioPort;
use embedded_hal::spi::{Mode, Phase, Polarity};

bitflags! {
    /// Bus operation flags of a [`SpiConfig`].
    pub struct SpiOperation: u16 {
        /// Clock idles high.
        const MODE_CPOL     = 1 << 1;
        /// Data is captured on the second clock transition.
        const MODE_CPHA     = 1 << 2;
        /// Shift out the least significant bit first.
        const TRANSFER_LSB  = 1 << 4;
    }
}

impl SpiOperation {
    /// Clock polarity and phase encoded in these flags.
    pub fn mode(&self) -> Mode {
        Mode {
            polarity: if self.contains(Self::MODE_CPOL) {
                Polarity::IdleHigh
            } else {
                Polarity::IdleLow
            },
            phase: if self.contains(Self::MODE_CPHA) {
                Phase::CaptureOnSecondTransition
            } else {
                Phase::CaptureOnFirstTransition
            },
        }
    }
}

impl From<Mode> for SpiOperation {
    fn from(mode: Mode) -> Self {
        let mut op = SpiOperation::empty();
        if let Polarity::IdleHigh = mode.polarity {
            op |= SpiOperation::MODE_CPOL;
        }
        if let Phase::CaptureOnSecondTransition = mode.phase {
            op |= SpiOperation::MODE_CPHA;
        }
        op
    }
}

/// GPIO chip-select line of a [`SpiConfig`].
///
/// `delay` is applied twice per transaction: after asserting (setup) and
/// before deasserting (hold).
#[derive(Clone, Copy)]
pub struct SpiCsControl<'a> {
    pub gpio_dev: &'a dyn GpioPort,
    pub gpio_pin: u32,
    /// Microseconds.
    pub delay: u32,
}

impl<'a> SpiCsControl<'a> {
    pub const fn new(gpio_dev: &'a dyn GpioPort, gpio_pin: u32, delay: u32) -> Self {
        Self { gpio_dev, gpio_pin, delay }
    }
}

/// Settings of one transaction.
///
/// A [`SpiContext`](super::SpiContext) recognises a config by address, so
/// drivers reusing the same `SpiConfig` value across transactions can skip
/// reprogramming the controller.
#[derive(Clone, Copy)]
pub struct SpiConfig<'a> {
    /// Bus frequency in Hz.
    pub frequency: u32,
    pub operation: SpiOperation,
    /// Bits per frame.
    pub word_size: u8,
    pub cs: Option<SpiCsControl<'a>>,
}

impl<'a> SpiConfig<'a> {
    pub const fn new(frequency: u32, operation: SpiOperation) -> Self {
        Self {
            frequency,
            operation,
            word_size: DEFAULT_WORD_SIZE,
            cs: None,
        }
    }

    pub const fn with_word_size(mut self, word_size: u8) -> Self {
        self.word_size = word_size;
        self
    }

    pub const fn with_cs(mut self, cs: SpiCsControl<'a>) -> Self {
        self.cs = Some(cs);
        self
    }

    /// Data frame size: bytes each frame occupies in the buffers.
    pub fn dfs(&self) -> u8 {
        debug_assert!(
            self.word_size != 0 && self.word_size <= MAX_WORD_SIZE,
            "spi: unsupported word size {}",
            self.word_size
        );
        (self.word_size + BITS_PER_BYTE - 1) / BITS_PER_BYTE
    }
}
