use std::{
    convert::TryInto,
    fmt,
    ops::{Index, IndexMut},
};

/// Occurrence count of every byte value in an input.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteFrequency {
    bytes: [usize; u8::MAX as usize + 1],
}

impl Index<u8> for ByteFrequency {
    type Output = usize;

    fn index(&self, index: u8) -> &usize {
        &self.bytes[index as usize]
    }
}

impl IndexMut<u8> for ByteFrequency {
    fn index_mut(&mut self, index: u8) -> &mut Self::Output {
        &mut self.bytes[index as usize]
    }
}

impl Default for ByteFrequency {
    fn default() -> Self {
        Self { bytes: [0; 256] }
    }
}

// Only seen bytes; 256 mostly-zero entries drown the trace log.
impl fmt::Debug for ByteFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl ByteFrequency {
    pub fn of(bytes: &[u8]) -> Self {
        let mut this = ByteFrequency::default();
        this.count(bytes);
        this
    }

    /// Adds every byte of `bytes` to the tally.
    pub fn count(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self[byte] += 1;
        }
    }

    /// Byte values that occurred at least once, ascending, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.bytes
            .iter()
            .enumerate()
            .filter(|&(_, &frequency)| frequency > 0)
            .map(|(byte, &frequency)| (byte.try_into().unwrap(), frequency))
    }

    /// Number of distinct byte values seen.
    pub fn len(&self) -> usize {
        self.bytes.iter().filter(|&&frequency| frequency > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|&frequency| frequency == 0)
    }
}
