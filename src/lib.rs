//! Transfer bookkeeping shared by SPI controller drivers.
//!
//! A driver keeps one [`SpiContext`] per controller. For every transaction it
//! binds the [`SpiConfig`], arms the transmit/receive cursors over the caller's
//! scatter-gather lists with [`SpiContext::buffers_setup`], and then advances
//! them one frame at a time while it clocks the bus. Chip-select is driven
//! through a [`GpioPort`] with the setup/hold delay taken from the config.

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

#[macro_use]
pub mod console;
pub mod config;
pub mod driver;
pub mod timer;
pub mod utils;

pub use driver::gpio::{GpioFlags, GpioPort, HalGpio};
pub use driver::spi::{
    BufPos, SpiBuf, SpiBufMut, SpiConfig, SpiContext, SpiCsControl, SpiOperation,
};
pub use timer::{BusyDelay, TickSource};
