//! Point-cloud encoding, the inverse of [`decode`](super::decode).

use super::layout::{block_offset, encoded_size, Block};
use crate::point_cloud::PointCloud;
use byteorder::{ByteOrder, LittleEndian};
use std::io::Write;

/// Encode `cloud` in the binary layout. The color block is written only
/// when the cloud carries colors.
pub fn encode(cloud: &PointCloud) -> Vec<u8> {
    let n = cloud.point_count();
    let size = encoded_size(n, cloud.is_colored())
        .expect("encoded size checked by PointCloud constructors - invariant broken");
    let mut buf = vec![0u8; size];

    LittleEndian::write_u32(&mut buf[..4], n);

    for (block, column) in Block::COORDS.into_iter().zip([cloud.xs(), cloud.ys(), cloud.zs()]) {
        let start = block_offset(block, n) as usize;
        let end = start + column.len() * block.element_size();
        LittleEndian::write_i16_into(column, &mut buf[start..end]);
    }

    if let Some(colors) = cloud.colors() {
        for (block, column) in Block::COLORS.into_iter().zip([&colors.rs, &colors.gs, &colors.bs]) {
            let start = block_offset(block, n) as usize;
            buf[start..start + column.len()].copy_from_slice(column);
        }
    }

    buf
}

pub fn encode_into<W: Write>(cloud: &PointCloud, mut writer: W) -> std::io::Result<()> {
    writer.write_all(&encode(cloud))
}
