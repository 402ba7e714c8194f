//! Byte layout of a point-cloud file.
//!
//! ```text
//! offset      field        type
//! 0           point_count  u32 LE
//! 4           x[N]         i16 LE
//! 4 + 2N      y[N]         i16 LE
//! 4 + 4N      z[N]         i16 LE
//! 4 + 6N      r[N]         u8      (colored only)
//! 4 + 7N      g[N]         u8      (colored only)
//! 4 + 8N      b[N]         u8      (colored only)
//! ```

use binrw::{BinRead, BinReaderExt};
use std::io::Cursor;

pub const HEADER_SIZE: usize = 4;
pub const COORD_SIZE: usize = 2;
pub const COLOR_SIZE: usize = 1;

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct PointCloudHeader {
    pub point_count: u32,
}

impl PointCloudHeader {
    pub fn parse(buf: &[u8]) -> binrw::BinResult<Self> {
        let mut cursor = Cursor::new(buf);
        cursor.read_le()
    }
}

/// Column blocks in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    X,
    Y,
    Z,
    R,
    G,
    B,
}

impl Block {
    pub const COORDS: [Block; 3] = [Block::X, Block::Y, Block::Z];
    pub const COLORS: [Block; 3] = [Block::R, Block::G, Block::B];

    pub fn element_size(self) -> usize {
        match self {
            Block::X | Block::Y | Block::Z => COORD_SIZE,
            Block::R | Block::G | Block::B => COLOR_SIZE,
        }
    }
}

/// Byte offset of `block` in a file of `point_count` points.
pub fn block_offset(block: Block, point_count: u32) -> u64 {
    let n = u64::from(point_count);
    let coord = COORD_SIZE as u64 * n;
    let color = COLOR_SIZE as u64 * n;
    let start = HEADER_SIZE as u64;

    match block {
        Block::X => start,
        Block::Y => start + coord,
        Block::Z => start + 2 * coord,
        Block::R => start + 3 * coord,
        Block::G => start + 3 * coord + color,
        Block::B => start + 3 * coord + 2 * color,
    }
}

/// Total file length for `point_count` points. Computed in `u64`, so any
/// `u32` count is representable.
pub fn encoded_len(point_count: u32, colored: bool) -> u64 {
    let n = u64::from(point_count);
    let mut len = HEADER_SIZE as u64 + 3 * COORD_SIZE as u64 * n;
    if colored {
        len += 3 * COLOR_SIZE as u64 * n;
    }
    len
}

/// [`encoded_len`] as a buffer size, `None` when it is not addressable on
/// this target.
pub fn encoded_size(point_count: u32, colored: bool) -> Option<usize> {
    usize::try_from(encoded_len(point_count, colored)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_field_order() {
        let n = 10;
        assert_eq!(block_offset(Block::X, n), 4);
        assert_eq!(block_offset(Block::Y, n), 24);
        assert_eq!(block_offset(Block::Z, n), 44);
        assert_eq!(block_offset(Block::R, n), 64);
        assert_eq!(block_offset(Block::G, n), 74);
        assert_eq!(block_offset(Block::B, n), 84);
        assert_eq!(encoded_len(n, true), 94);
        assert_eq!(encoded_len(n, false), block_offset(Block::R, n));
    }

    #[test]
    fn encoded_len_does_not_overflow() {
        assert_eq!(encoded_len(u32::MAX, true), 4 + 9 * u64::from(u32::MAX));
    }

    #[test]
    fn encoded_size_matches_encoded_len() {
        assert_eq!(encoded_size(2, true), Some(22));
        assert_eq!(encoded_size(0, false), Some(HEADER_SIZE));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(encoded_size(u32::MAX, true), Some(4 + 9 * u32::MAX as usize));
        #[cfg(target_pointer_width = "32")]
        assert_eq!(encoded_size(u32::MAX, true), None);
    }

    #[test]
    fn header_is_little_endian() {
        let header = PointCloudHeader::parse(&[0x01, 0x02, 0x00, 0x00, 0xff]).unwrap();
        assert_eq!(header.point_count, 0x0201);
    }

    #[test]
    fn short_header_fails() {
        assert!(PointCloudHeader::parse(&[0x01, 0x02, 0x03]).is_err());
    }
}
