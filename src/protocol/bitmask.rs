//! Bitmask helpers
//!
//! Variable-length bitmasks as used by "supported ..." reports.
//!
//! ```text
//!  byte 0                  byte 1
//! ┌─┬─┬─┬─┬─┬─┬─┬─┐       ┌─┬─┬─┬─┬─┬──┬──┬──┐
//! │7│6│5│4│3│2│1│0│       │7│6│5│4│3│2 │1 │0 │   bit in byte
//! └─┴─┴─┴─┴─┴─┴─┴─┘       └─┴─┴─┴─┴─┴──┴──┴──┘
//!  s+7 ...        s        s+15 ...        s+8   index (s = start)
//! ```

/// Decode a bitmask into the ordered list of indices whose bit is set
///
/// Bit 0 of byte 0 maps to `start`. Empty input yields an empty list.
pub fn decode_bitmask(bytes: &[u8], start: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    for (byte_index, byte) in bytes.iter().enumerate() {
        for bit in 0..8 {
            if byte & (1 << bit) != 0 {
                indices.push(start + byte_index * 8 + bit);
            }
        }
    }
    indices
}

/// Encode indices into the shortest bitmask that holds them
///
/// Indices below `start` cannot be represented and are ignored.
pub fn encode_bitmask(indices: &[usize], start: usize) -> Vec<u8> {
    let Some(highest) = indices.iter().copied().filter(|&i| i >= start).max() else {
        return Vec::new();
    };

    let mut bytes = vec![0u8; (highest - start) / 8 + 1];
    for &index in indices.iter().filter(|&&i| i >= start) {
        let offset = index - start;
        bytes[offset / 8] |= 1 << (offset % 8);
    }
    bytes
}
