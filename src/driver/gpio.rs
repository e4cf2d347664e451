use core::cell::RefCell;
use embedded_hal::digital::v2::OutputPin;

bitflags! {
    /// Pin configuration requested through [`GpioPort::pin_configure`].
    pub struct GpioFlags: u32 {
        const INPUT             = 1 << 0;
        const OUTPUT            = 1 << 1;
        /// Drive high as part of switching to output.
        const OUTPUT_INIT_HIGH  = 1 << 2;
        /// Drive low as part of switching to output.
        const OUTPUT_INIT_LOW   = 1 << 3;
        const PULL_UP           = 1 << 4;
        const PULL_DOWN         = 1 << 5;
    }
}

/// A GPIO controller, addressed by pin number.
///
/// Calls are synchronous and return once the level change is issued. Failures
/// are the port's business: callers in this crate assume success.
pub trait GpioPort {
    fn pin_configure(&self, pin: u32, flags: GpioFlags);
    fn pin_write(&self, pin: u32, value: bool);
}

/// [`GpioPort`] over a bank of embedded-hal output pins, pin `n` being
/// `pins[n]`.
///
/// The bank is borrowed mutably on every write, so it can be moved to another
/// thread (when the pins can) but not shared between threads:
///
/// ```compile_fail
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::v2::OutputPin;
/// # use spi_context::HalGpio;
/// # struct Pin;
/// # impl OutputPin for Pin {
/// #     type Error = Infallible;
/// #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// # }
/// fn shared<T: Sync>(_: &T) {}
/// shared(&HalGpio::new([Pin]));
/// ```
pub struct HalGpio<P: OutputPin, const N: usize> {
    pins: RefCell<[P; N]>,
}

impl<P: OutputPin, const N: usize> HalGpio<P, N> {
    pub const fn new(pins: [P; N]) -> Self {
        Self { pins: RefCell::new(pins) }
    }

    pub fn free(self) -> [P; N] {
        self.pins.into_inner()
    }

    fn set(&self, pin: u32, value: bool) {
        let mut pins = self.pins.borrow_mut();
        let Some(p) = pins.get_mut(pin as usize) else {
            warn!("gpio: pin {} out of range (bank has {})", pin, N);
            return;
        };
        let res = if value { p.set_high() } else { p.set_low() };
        if res.is_err() {
            warn!("gpio: failed to drive pin {} {}", pin, if value { "high" } else { "low" });
        }
    }
}

impl<P: OutputPin, const N: usize> GpioPort for HalGpio<P, N> {
    fn pin_configure(&self, pin: u32, flags: GpioFlags) {
        // embedded-hal pins are outputs by type, only the initial level applies
        if flags.intersects(GpioFlags::INPUT | GpioFlags::PULL_UP | GpioFlags::PULL_DOWN) {
            warn!("gpio: pin {} is output only, ignoring {:?}", pin, flags);
        }
        if flags.contains(GpioFlags::OUTPUT_INIT_HIGH) {
            self.set(pin, true);
        } else if flags.contains(GpioFlags::OUTPUT_INIT_LOW) {
            self.set(pin, false);
        }
    }

    fn pin_write(&self, pin: u32, value: bool) {
        self.set(pin, value);
    }
}
