//! SPI transfer context.
//!
//! [`SpiContext`] is the part of an SPI controller driver that does not touch
//! the controller: it walks the transaction's scatter-gather lists frame by
//! frame and sequences the GPIO chip-select line around the transfer. A
//! polled driver typically looks like
//!
//! ```ignore
//! if !ctx.is_configured(config) {
//!     ctx.set_config(config);
//!     /* program the controller for config.operation / frequency */
//!     ctx.cs_configure();
//! }
//! let dfs = config.dfs();
//! ctx.buffers_setup(tx, rx, dfs);
//! ctx.cs_control(true);
//! while ctx.tx_on() || ctx.rx_on() {
//!     let word = ctx.tx_frame(tx, dfs); // None: clock out zeros
//!     /* shift one frame */
//!     ctx.update_tx(tx, dfs);
//!     if let Some(dst) = ctx.rx_frame_mut(rx, dfs) { /* store */ }
//!     ctx.update_rx(rx, dfs);
//! }
//! ctx.cs_control(false);
//! ```

mod buf;
mod config;
mod context;
mod cs;
mod cursor;

pub use buf::{total_len, BufPos, Segment, SpiBuf, SpiBufMut};
pub use config::{SpiConfig, SpiCsControl, SpiOperation};
pub use context::SpiContext;
