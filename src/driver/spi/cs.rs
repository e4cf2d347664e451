use super::config::SpiCsControl;
use super::context::SpiContext;
use crate::config::{CS_ACTIVE_LEVEL, CS_INACTIVE_LEVEL, MAX_CS_DELAY_US};
use crate::driver::gpio::GpioFlags;
use embedded_hal::blocking::delay::DelayUs;

impl<'a, D> SpiContext<'a, D> {
    fn cs(&self) -> Option<&'a SpiCsControl<'a>> {
        self.config().and_then(|config| config.cs.as_ref())
    }

    /// Turn the bound config's chip-select pin into an output, deasserted.
    /// Nothing to do without a config or when it has no chip-select.
    pub fn cs_configure(&self) {
        let Some(cs) = self.cs() else {
            return;
        };
        if cs.delay > MAX_CS_DELAY_US {
            warn!(
                "spi: cs pin {} delay {}us exceeds {}us",
                cs.gpio_pin, cs.delay, MAX_CS_DELAY_US
            );
        }
        debug!("spi: cs pin {} as output, delay {}us", cs.gpio_pin, cs.delay);
        cs.gpio_dev.pin_configure(cs.gpio_pin, GpioFlags::OUTPUT);
        cs.gpio_dev.pin_write(cs.gpio_pin, CS_INACTIVE_LEVEL);
    }
}

impl<'a, D: DelayUs<u32>> SpiContext<'a, D> {
    /// Assert (`on`) or deassert the chip-select line.
    ///
    /// Asserting drives the line first and then waits the setup delay, so
    /// the caller may start clocking as soon as this returns. Deasserting
    /// waits the hold delay first. Both waits spin.
    pub fn cs_control(&mut self, on: bool) {
        let Some(cs) = self.cs() else {
            return;
        };
        if on {
            cs.gpio_dev.pin_write(cs.gpio_pin, CS_ACTIVE_LEVEL);
            self.delay.delay_us(cs.delay);
        } else {
            self.delay.delay_us(cs.delay);
            cs.gpio_dev.pin_write(cs.gpio_pin, CS_INACTIVE_LEVEL);
        }
    }
}
