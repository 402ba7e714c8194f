use crate::resource::{Resource, ResourceClient, ResourceError};
use serde::Deserialize;
use thiserror::Error;

pub async fn parse_manifest<C: ResourceClient>(
    resource: &Resource<C>,
) -> Result<Manifest, ReadManifestError> {
    let manifest: Manifest = resource.get_json(None).await?;
    manifest.validate()?;
    Ok(manifest)
}

#[derive(Error, Debug)]
pub enum ReadManifestError {
    #[error("Invalid json: {0}")]
    JsonError(#[from] serde_json::error::Error),

    #[error("Resource error: {0}")]
    ResourceError(ResourceError),

    #[error("Duplicate dataset name: {0}")]
    DuplicateDataset(String),
}

impl From<ResourceError> for ReadManifestError {
    fn from(error: ResourceError) -> Self {
        match error {
            ResourceError::Json(error) => ReadManifestError::JsonError(error),
            other => ReadManifestError::ResourceError(other),
        }
    }
}

/// List of point-cloud files to load together.
///
/// ```json
/// {
///   "name": "LiDAR Point Cloud",
///   "datasets": [
///     { "name": "Buildings", "file": "buildings.bin" },
///     { "name": "Vegetation", "file": "green.bin", "colored": true }
///   ]
/// }
/// ```
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub name: String,
    pub datasets: Vec<DatasetEntry>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEntry {
    pub name: String,
    /// Path relative to the manifest's base url.
    pub file: String,
    /// Whether the file carries the trailing `r`, `g`, `b` block.
    #[serde(default)]
    pub colored: bool,
}

impl Manifest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ReadManifestError> {
        let manifest: Manifest = serde_json::from_slice(bytes)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ReadManifestError> {
        for (i, dataset) in self.datasets.iter().enumerate() {
            if self.datasets[..i].iter().any(|d| d.name == dataset.name) {
                return Err(ReadManifestError::DuplicateDataset(dataset.name.clone()));
            }
        }
        Ok(())
    }

    pub fn dataset(&self, name: &str) -> Option<&DatasetEntry> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// Url of `dataset` below `base_url`, joined with a single `/`.
    pub fn dataset_url(base_url: &str, dataset: &DatasetEntry) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            dataset.file.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "name": "LiDAR Point Cloud",
        "datasets": [
            { "name": "Buildings", "file": "buildings.bin" },
            { "name": "Vegetation", "file": "green.bin", "colored": true }
        ]
    }"#;

    #[test]
    fn parses_datasets_with_default_color_flag() {
        let manifest = Manifest::from_slice(MANIFEST.as_bytes()).unwrap();

        assert_eq!(manifest.name, "LiDAR Point Cloud");
        assert_eq!(manifest.datasets.len(), 2);
        assert!(!manifest.dataset("Buildings").unwrap().colored);
        assert!(manifest.dataset("Vegetation").unwrap().colored);
        assert!(manifest.dataset("Water").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let json = r#"{ "datasets": [
            { "name": "a", "file": "a.bin" },
            { "name": "a", "file": "b.bin" }
        ] }"#;
        assert!(matches!(
            Manifest::from_slice(json.as_bytes()),
            Err(ReadManifestError::DuplicateDataset(name)) if name == "a"
        ));
    }

    #[test]
    fn missing_datasets_is_invalid() {
        assert!(matches!(
            Manifest::from_slice(br#"{ "name": "x" }"#),
            Err(ReadManifestError::JsonError(_))
        ));
    }

    #[test]
    fn dataset_url_uses_single_separator() {
        let dataset = DatasetEntry {
            name: "b".into(),
            file: "/assets/b.bin".into(),
            colored: false,
        };
        assert_eq!(
            Manifest::dataset_url("file:///data/", &dataset),
            "file:///data/assets/b.bin"
        );
        assert_eq!(
            Manifest::dataset_url("http://host/x", &dataset),
            "http://host/x/assets/b.bin"
        );
    }
}
