//! Decoder and loader for a columnar binary LiDAR point-cloud format.
//!
//! A file holds a little-endian `u32` point count followed by the `x`, `y`
//! and `z` coordinates as contiguous `i16` blocks and, when the dataset is
//! colored, the `r`, `g` and `b` channels as contiguous `u8` blocks. Whether
//! the color block is present is not stored in the file; the caller (or a
//! [`Manifest`]) supplies it.
//!
//! Decoding is a pure synchronous function over a byte slice. Fetching the
//! bytes is left to a [`resource::ResourceClient`] so the same decoder works
//! with local files and HTTP.

pub mod format;
pub mod loader;
pub mod manifest;
pub mod point;
pub mod point_cloud;
pub mod prelude;
pub mod resource;

pub use format::{decode, encode, encode_into, DecodeError};
pub use loader::{load_manifest, load_point_cloud, LoadPointCloudError, LoadReport, LoadedDataset};
pub use manifest::{parse_manifest, DatasetEntry, Manifest, ReadManifestError};
pub use point::{Aabb, PointData};
pub use point_cloud::{Colors, PointCloud, PointCloudError};
