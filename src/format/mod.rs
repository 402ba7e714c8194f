pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod layout;

pub use cursor::ByteCursor;
pub use decoder::decode;
pub use encoder::{encode, encode_into};
pub use layout::{block_offset, encoded_len, encoded_size, Block, PointCloudHeader, HEADER_SIZE};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid header, the point count needs 4 bytes: {0}")]
    InvalidHeader(#[from] binrw::Error),

    #[error("Truncated buffer: {required} bytes required, {actual} available")]
    TruncatedBuffer { required: u64, actual: u64 },
}
