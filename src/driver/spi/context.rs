use super::buf::{BufPos, SpiBuf, SpiBufMut};
use super::config::SpiConfig;
use super::cursor::BufCursor;
use core::ptr;

/// Per-controller transfer state.
///
/// The context never borrows the buffer lists: it keeps, for each side, an
/// index into the list and a byte offset into the current segment. Every call
/// that needs the list takes it again, and it must be the list the side was
/// armed with by [`buffers_setup`](Self::buffers_setup).
///
/// `D` is the busy-wait delay used for chip-select timing.
pub struct SpiContext<'a, D> {
    config: Option<&'a SpiConfig<'a>>,
    tx: BufCursor,
    rx: BufCursor,
    pub(super) delay: D,
}

impl<'a, D> SpiContext<'a, D> {
    pub const fn new(delay: D) -> Self {
        Self {
            config: None,
            tx: BufCursor::new(),
            rx: BufCursor::new(),
            delay,
        }
    }

    pub fn set_config(&mut self, config: &'a SpiConfig<'a>) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&'a SpiConfig<'a>> {
        self.config
    }

    /// Whether `config` is the very config last bound with
    /// [`set_config`](Self::set_config). An equal copy is a different config.
    pub fn is_configured(&self, config: &SpiConfig<'a>) -> bool {
        self.config.map_or(false, |c| ptr::eq(c, config))
    }

    pub fn release(self) -> D {
        self.delay
    }

    /// Arm both sides at the head of their lists. Must precede any
    /// `update_*` call of a transaction.
    pub fn buffers_setup(&mut self, tx_bufs: &[SpiBuf], rx_bufs: &[SpiBufMut], dfs: u8) {
        trace!(
            "tx_bufs {} ({:?}) - rx_bufs {} ({:?}) - {}",
            tx_bufs.len(),
            tx_bufs.first().map(|b| b.len()),
            rx_bufs.len(),
            rx_bufs.first().map(|b| b.len()),
            dfs
        );

        self.tx = BufCursor::setup(tx_bufs, dfs);
        self.rx = BufCursor::setup(rx_bufs, dfs);

        trace!(
            "tx buf/len {:?}/{}, rx buf/len {:?}/{}",
            self.tx.pos(),
            self.tx.len(),
            self.rx.pos(),
            self.rx.len()
        );
    }

    /// One transmit frame went out.
    #[inline(always)]
    pub fn update_tx(&mut self, tx_bufs: &[SpiBuf], dfs: u8) {
        self.tx.update(tx_bufs, dfs);
        #[cfg(feature = "trace_cursor")]
        trace!("tx buf/len {:?}/{}", self.tx.pos(), self.tx.len());
    }

    /// One receive frame came in.
    #[inline(always)]
    pub fn update_rx(&mut self, rx_bufs: &[SpiBufMut], dfs: u8) {
        self.rx.update(rx_bufs, dfs);
        #[cfg(feature = "trace_cursor")]
        trace!("rx buf/len {:?}/{}", self.rx.pos(), self.rx.len());
    }

    /// Transmit side still has frames to clock, real or placeholder.
    #[inline(always)]
    pub fn tx_on(&self) -> bool {
        self.tx.on()
    }

    #[inline(always)]
    pub fn rx_on(&self) -> bool {
        self.rx.on()
    }

    /// Current transmit frame comes from memory.
    #[inline(always)]
    pub fn tx_buf_on(&self) -> bool {
        self.tx.buf_on()
    }

    #[inline(always)]
    pub fn rx_buf_on(&self) -> bool {
        self.rx.buf_on()
    }

    /// Frames left in the current transmit segment.
    pub fn tx_len(&self) -> usize {
        self.tx.len()
    }

    pub fn rx_len(&self) -> usize {
        self.rx.len()
    }

    pub fn tx_pos(&self) -> Option<BufPos> {
        self.tx.pos()
    }

    pub fn rx_pos(&self) -> Option<BufPos> {
        self.rx.pos()
    }

    /// Bytes of the current transmit frame, `None` for placeholder frames
    /// and once the side is exhausted.
    pub fn tx_frame<'b>(&self, tx_bufs: &[SpiBuf<'b>], dfs: u8) -> Option<&'b [u8]> {
        let pos = self.tx.pos()?;
        let data = tx_bufs.get(pos.seg)?.as_slice()?;
        data.get(pos.offset..pos.offset + dfs as usize)
    }

    /// Where the current receive frame goes, `None` when it is to be
    /// discarded.
    pub fn rx_frame_mut<'r>(
        &self,
        rx_bufs: &'r mut [SpiBufMut<'_>],
        dfs: u8,
    ) -> Option<&'r mut [u8]> {
        let pos = self.rx.pos()?;
        let data = rx_bufs.get_mut(pos.seg)?.as_mut_slice()?;
        data.get_mut(pos.offset..pos.offset + dfs as usize)
    }

    /// Frames both active sides can move before either reaches the end of its
    /// current segment.
    pub fn max_continuous_chunk(&self) -> usize {
        match (self.tx.len(), self.rx.len()) {
            (0, rx_len) => rx_len,
            (tx_len, 0) => tx_len,
            (tx_len, rx_len) => tx_len.min(rx_len),
        }
    }
}
