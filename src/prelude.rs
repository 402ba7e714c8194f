pub use crate::format::decode;
pub use crate::format::encode;
pub use crate::loader::{load_manifest, load_point_cloud, LoadReport};
pub use crate::manifest::Manifest;
pub use crate::point::{Aabb, PointData};
pub use crate::point_cloud::{Colors, PointCloud};
pub use crate::resource::{Resource, ResourceClient};

// Error types
pub use crate::format::DecodeError;
pub use crate::loader::LoadPointCloudError;
pub use crate::manifest::ReadManifestError;
pub use crate::point_cloud::PointCloudError;
pub use crate::resource::ResourceError;
