/// Transmit buffer descriptor.
///
/// A descriptor without data is a placeholder: `len` bytes are clocked out
/// (as whatever the controller sends when it has nothing, usually zeros)
/// without reading memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiBuf<'b> {
    buf: Option<&'b [u8]>,
    len: usize,
}

impl<'b> SpiBuf<'b> {
    pub const fn new(buf: &'b [u8]) -> Self {
        Self { buf: Some(buf), len: buf.len() }
    }

    pub const fn dummy(len: usize) -> Self {
        Self { buf: None, len }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> Option<&'b [u8]> {
        self.buf
    }
}

/// Receive buffer descriptor.
///
/// A descriptor without data discards `len` received bytes.
#[derive(Debug, PartialEq, Eq)]
pub struct SpiBufMut<'b> {
    buf: Option<&'b mut [u8]>,
    len: usize,
}

impl<'b> SpiBufMut<'b> {
    pub fn new(buf: &'b mut [u8]) -> Self {
        let len = buf.len();
        Self { buf: Some(buf), len }
    }

    pub const fn dummy(len: usize) -> Self {
        Self { buf: None, len }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> Option<&[u8]> {
        self.buf.as_deref()
    }

    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        self.buf.as_deref_mut()
    }
}

/// What a cursor needs to know about one element of a buffer list.
pub trait Segment {
    /// Length in bytes.
    fn seg_len(&self) -> usize;
    /// Whether the segment is backed by memory (false for placeholders).
    fn has_data(&self) -> bool;
}

impl Segment for SpiBuf<'_> {
    fn seg_len(&self) -> usize {
        self.len
    }

    fn has_data(&self) -> bool {
        self.buf.is_some()
    }
}

impl Segment for SpiBufMut<'_> {
    fn seg_len(&self) -> usize {
        self.len
    }

    fn has_data(&self) -> bool {
        self.buf.is_some()
    }
}

/// Location of the current frame: byte `offset` into segment `seg` of the
/// list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufPos {
    pub seg: usize,
    pub offset: usize,
}

/// Number of `dfs`-byte frames in `len` bytes.
pub(super) fn frames(len: usize, dfs: u8) -> usize {
    debug_assert!(dfs != 0, "spi: zero data frame size");
    debug_assert!(
        len % dfs as usize == 0,
        "spi: buffer length {} is not a multiple of frame size {}",
        len,
        dfs
    );
    len / dfs as usize
}

/// Total frames described by a buffer list.
pub fn total_len<S: Segment>(list: &[S], dfs: u8) -> usize {
    list.iter().map(|s| frames(s.seg_len(), dfs)).sum()
}
