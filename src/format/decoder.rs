//! Point-cloud decoding.

use super::cursor::ByteCursor;
use super::layout::{encoded_len, PointCloudHeader, HEADER_SIZE};
use super::DecodeError;
use crate::point_cloud::{Colors, PointCloud};
use tracing::debug;

/// Decode a point-cloud buffer.
///
/// `colored` says whether the `r`, `g`, `b` block follows the coordinates;
/// the format does not record it.
///
/// The length required by the header is checked before any column is read,
/// so a failure never yields a partial cloud. Bytes past the required length
/// are ignored.
pub fn decode(buffer: &[u8], colored: bool) -> Result<PointCloud, DecodeError> {
    let header = PointCloudHeader::parse(buffer)?;

    let required = encoded_len(header.point_count, colored);
    let actual = buffer.len() as u64;
    if actual < required {
        return Err(DecodeError::TruncatedBuffer { required, actual });
    }
    if actual > required {
        debug!(
            point_count = header.point_count,
            trailing = actual - required,
            "ignoring trailing bytes"
        );
    }

    // fits in usize, it is bounded by the buffer length
    let n = header.point_count as usize;
    let mut cursor = ByteCursor::at(buffer, HEADER_SIZE);

    let xs = cursor.read_i16_le_array(n)?;
    let ys = cursor.read_i16_le_array(n)?;
    let zs = cursor.read_i16_le_array(n)?;

    let colors = if colored {
        let rs = cursor.read_u8_array(n)?;
        let gs = cursor.read_u8_array(n)?;
        let bs = cursor.read_u8_array(n)?;
        Some(Colors::new(rs, gs, bs))
    } else {
        None
    };

    Ok(PointCloud::from_columns(xs, ys, zs, colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords_buffer() -> Vec<u8> {
        let mut buf = vec![0x02, 0x00, 0x00, 0x00];
        for v in [1i16, -1, 2, -2, 3, -3] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    fn colored_buffer() -> Vec<u8> {
        let mut buf = coords_buffer();
        buf.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
        buf
    }

    #[test]
    fn decodes_coordinates() {
        let cloud = decode(&coords_buffer(), false).unwrap();

        assert_eq!(cloud.xs(), &[1, -1]);
        assert_eq!(cloud.ys(), &[2, -2]);
        assert_eq!(cloud.zs(), &[3, -3]);
        assert!(cloud.colors().is_none());
    }

    #[test]
    fn decodes_colors_from_separate_blocks() {
        let cloud = decode(&colored_buffer(), true).unwrap();

        assert_eq!(cloud.xs(), &[1, -1]);
        assert_eq!(cloud.ys(), &[2, -2]);
        assert_eq!(cloud.zs(), &[3, -3]);
        assert_eq!(cloud.rs(), Some(&[10, 20][..]));
        assert_eq!(cloud.gs(), Some(&[30, 40][..]));
        assert_eq!(cloud.bs(), Some(&[50, 60][..]));
    }

    #[test]
    fn colored_buffer_read_without_colors_ignores_them() {
        let cloud = decode(&colored_buffer(), false).unwrap();
        assert_eq!(cloud.len(), 2);
        assert!(!cloud.is_colored());
    }

    #[test]
    fn zero_points() {
        let plain = decode(&[0, 0, 0, 0], false).unwrap();
        assert!(plain.is_empty());
        assert!(plain.colors().is_none());

        let colored = decode(&[0, 0, 0, 0], true).unwrap();
        assert!(colored.is_empty());
        assert_eq!(colored.rs(), Some(&[][..]));
        assert_eq!(colored.gs(), Some(&[][..]));
        assert_eq!(colored.bs(), Some(&[][..]));
    }

    #[test]
    fn short_headers_are_invalid() {
        for len in 0..HEADER_SIZE {
            let buf = vec![0xffu8; len];
            assert!(matches!(
                decode(&buf, false),
                Err(DecodeError::InvalidHeader(_))
            ));
            assert!(matches!(
                decode(&buf, true),
                Err(DecodeError::InvalidHeader(_))
            ));
        }
    }

    #[test]
    fn one_byte_short_is_truncated() {
        let buf = coords_buffer();
        let err = decode(&buf[..buf.len() - 1], false).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedBuffer {
                required: 16,
                actual: 15
            }
        ));

        let buf = colored_buffer();
        let err = decode(&buf[..buf.len() - 1], true).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedBuffer {
                required: 22,
                actual: 21
            }
        ));
    }

    #[test]
    fn uncolored_buffer_read_as_colored_is_truncated() {
        assert!(matches!(
            decode(&coords_buffer(), true),
            Err(DecodeError::TruncatedBuffer { .. })
        ));
    }

    #[test]
    fn huge_point_count_is_truncated_not_allocated() {
        let err = decode(&[0xff, 0xff, 0xff, 0xff], true).unwrap_err();
        match err {
            DecodeError::TruncatedBuffer { required, actual } => {
                assert_eq!(required, 4 + 9 * u64::from(u32::MAX));
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
