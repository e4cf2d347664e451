use super::buf::{frames, BufPos, Segment};

/// Position of one side (tx or rx) of a transaction inside its buffer list.
///
/// `len` counts the frames left in segment `seg`. `buf` says whether that
/// segment is backed by memory; when it is, `offset` is the byte offset of the
/// current frame inside it. `len == 0 && !buf` is both "never armed" and
/// "list exhausted".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct BufCursor {
    seg: usize,
    offset: usize,
    len: usize,
    buf: bool,
}

impl BufCursor {
    pub const fn new() -> Self {
        Self { seg: 0, offset: 0, len: 0, buf: false }
    }

    /// Cursor at the head of `list`.
    pub fn setup<S: Segment>(list: &[S], dfs: u8) -> Self {
        let mut cursor = Self::new();
        cursor.load(list, dfs);
        cursor
    }

    /// Make segment `seg` (or the first non-empty one after it) current.
    fn load<S: Segment>(&mut self, list: &[S], dfs: u8) {
        while let Some(segment) = list.get(self.seg) {
            let len = frames(segment.seg_len(), dfs);
            if len != 0 {
                self.offset = 0;
                self.len = len;
                self.buf = segment.has_data();
                return;
            }
            self.seg += 1;
        }
        self.seg = list.len();
        self.offset = 0;
        self.len = 0;
        self.buf = false;
    }

    /// Consume one frame.
    pub fn update<S: Segment>(&mut self, list: &[S], dfs: u8) {
        if self.len == 0 {
            return;
        }

        self.len -= 1;
        if self.len == 0 {
            debug_assert!(self.seg < list.len(), "spi: cursor beyond its buffer list");
            self.seg += 1;
            self.load(list, dfs);
        } else if self.buf {
            self.offset += dfs as usize;
        }
    }

    pub fn on(&self) -> bool {
        self.buf || self.len != 0
    }

    pub fn buf_on(&self) -> bool {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn pos(&self) -> Option<BufPos> {
        if self.buf {
            Some(BufPos { seg: self.seg, offset: self.offset })
        } else {
            None
        }
    }
}
