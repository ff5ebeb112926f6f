// The engine's low hunk: one fixed allocation handed out in aligned, named
// blocks. Platform code only ever allocates; the engine frees back to marks.

use thiserror::Error;

/// Hunk blocks are aligned to 16 bytes like the original headers.
pub const HUNK_ALIGN: usize = 16;

const NAME_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum HunkError {
    #[error("hunk overflow: {requested} bytes requested, {available} available")]
    OutOfMemory { requested: usize, available: usize },
    #[error("mark {mark} past current low mark {used}")]
    BadMark { mark: usize, used: usize },
}

/// Handle to a hunk allocation. Data is reached through the owning `Hunk` so
/// blocks stay `Copy` and never borrow the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkBlock {
    offset: usize,
    len: usize,
}

impl HunkBlock {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Debug)]
pub struct Hunk {
    data: Vec<u8>,
    used: usize,
    names: Vec<(String, HunkBlock)>,
}

impl Hunk {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
            used: 0,
            names: Vec::new(),
        }
    }

    /// Allocate a zero-filled block, recording the first eight characters of
    /// `name` the way the original block headers do.
    pub fn alloc_named(&mut self, size: usize, name: &str) -> Result<HunkBlock, HunkError> {
        let padded = size.div_ceil(HUNK_ALIGN) * HUNK_ALIGN;
        let available = self.data.len() - self.used;
        if padded > available {
            return Err(HunkError::OutOfMemory {
                requested: size,
                available,
            });
        }

        let block = HunkBlock {
            offset: self.used,
            len: size,
        };
        self.used += padded;
        self.data[block.offset..block.offset + size].fill(0);

        let short: String = name.chars().take(NAME_LEN).collect();
        self.names.push((short, block));
        Ok(block)
    }

    pub fn alloc(&mut self, size: usize) -> Result<HunkBlock, HunkError> {
        self.alloc_named(size, "unknown")
    }

    pub fn low_mark(&self) -> usize {
        self.used
    }

    /// Release everything allocated after `mark`.
    pub fn free_to_mark(&mut self, mark: usize) -> Result<(), HunkError> {
        if mark > self.used {
            return Err(HunkError::BadMark {
                mark,
                used: self.used,
            });
        }
        self.used = mark;
        self.names.retain(|(_, block)| block.offset < mark);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.used
    }

    pub fn block(&self, block: HunkBlock) -> &[u8] {
        &self.data[block.offset..block.offset + block.len]
    }

    pub fn block_mut(&mut self, block: HunkBlock) -> &mut [u8] {
        &mut self.data[block.offset..block.offset + block.len]
    }

    pub fn name_of(&self, block: HunkBlock) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, b)| *b == block)
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_aligned() {
        let mut hunk = Hunk::new(1024);
        let first = hunk.alloc_named(10, "first").unwrap();
        let second = hunk.alloc_named(10, "second").unwrap();
        assert_eq!(first.offset() % HUNK_ALIGN, 0);
        assert_eq!(second.offset(), HUNK_ALIGN);
    }

    #[test]
    fn truncates_block_names() {
        let mut hunk = Hunk::new(256);
        let block = hunk.alloc_named(8, "averylongname").unwrap();
        assert_eq!(hunk.name_of(block), Some("averylon"));
    }

    #[test]
    fn rejects_overflow() {
        let mut hunk = Hunk::new(64);
        hunk.alloc_named(32, "a").unwrap();
        let err = hunk.alloc_named(64, "b").unwrap_err();
        assert!(matches!(err, HunkError::OutOfMemory { .. }));
    }

    #[test]
    fn free_to_mark_reclaims_space() {
        let mut hunk = Hunk::new(256);
        let mark = hunk.low_mark();
        hunk.alloc_named(100, "temp").unwrap();
        assert!(hunk.remaining() < 256);
        hunk.free_to_mark(mark).unwrap();
        assert_eq!(hunk.remaining(), 256);
    }

    #[test]
    fn reused_space_is_zeroed() {
        let mut hunk = Hunk::new(256);
        let mark = hunk.low_mark();
        let block = hunk.alloc_named(16, "scratch").unwrap();
        hunk.block_mut(block).fill(0xAA);
        hunk.free_to_mark(mark).unwrap();
        let block = hunk.alloc_named(16, "fresh").unwrap();
        assert!(hunk.block(block).iter().all(|&b| b == 0));
    }

    #[test]
    fn rejects_forward_mark() {
        let mut hunk = Hunk::new(64);
        assert!(matches!(
            hunk.free_to_mark(128),
            Err(HunkError::BadMark { .. })
        ));
    }
}
