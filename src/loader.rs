use crate::format::{decode, DecodeError};
use crate::manifest::{DatasetEntry, Manifest};
use crate::point_cloud::PointCloud;
use crate::resource::{Resource, ResourceClient, ResourceError};
use thiserror::Error;
use tracing::{debug, info, span, warn, Instrument, Level};

#[derive(Error, Debug)]
pub enum LoadPointCloudError {
    #[error("Error loading resource: {0}")]
    Resource(#[from] ResourceError),

    #[error("Error decoding points: {0}")]
    Decode(#[from] DecodeError),
}

/// Fetch a whole point-cloud file and decode it.
pub async fn load_point_cloud<C: ResourceClient>(
    resource: &Resource<C>,
    colored: bool,
) -> Result<PointCloud, LoadPointCloudError> {
    let buffer = resource.get(None).await?;
    debug!(url = resource.url(), len = buffer.len(), "fetched point cloud");

    Ok(decode(&buffer, colored)?)
}

#[derive(Debug)]
pub struct LoadedDataset {
    pub name: String,
    pub colored: bool,
    pub result: Result<PointCloud, LoadPointCloudError>,
}

impl LoadedDataset {
    pub fn cloud(&self) -> Option<&PointCloud> {
        self.result.as_ref().ok()
    }
}

/// Outcome of loading every dataset of a manifest, in manifest order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub datasets: Vec<LoadedDataset>,
}

impl LoadReport {
    pub fn get(&self, name: &str) -> Option<&LoadedDataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// Points over all datasets that decoded.
    pub fn total_points(&self) -> u64 {
        self.datasets
            .iter()
            .filter_map(LoadedDataset::cloud)
            .map(|cloud| u64::from(cloud.point_count()))
            .sum()
    }

    pub fn loaded(&self) -> impl Iterator<Item = (&str, &PointCloud)> {
        self.datasets
            .iter()
            .filter_map(|d| d.cloud().map(|cloud| (d.name.as_str(), cloud)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &LoadPointCloudError)> {
        self.datasets
            .iter()
            .filter_map(|d| d.result.as_ref().err().map(|err| (d.name.as_str(), err)))
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

async fn load_dataset<C: ResourceClient>(
    client: &C,
    base_url: &str,
    dataset: &DatasetEntry,
) -> LoadedDataset {
    let url = Manifest::dataset_url(base_url, dataset);
    let resource = Resource::new(&url, client);
    let result = load_point_cloud(&resource, dataset.colored).await;

    match &result {
        Ok(cloud) => info!(
            dataset = %dataset.name,
            points = cloud.point_count(),
            colored = dataset.colored,
            "loaded dataset"
        ),
        Err(error) => warn!(dataset = %dataset.name, %url, %error, "failed to load dataset"),
    }

    LoadedDataset {
        name: dataset.name.clone(),
        colored: dataset.colored,
        result,
    }
}

/// Load every dataset in `manifest`, resolving files against `base_url`.
///
/// A dataset that fails to fetch or decode is recorded in the report and
/// does not stop the others.
pub async fn load_manifest<C: ResourceClient>(
    client: &C,
    base_url: &str,
    manifest: &Manifest,
) -> LoadReport {
    let span = span!(Level::INFO, "load_manifest", manifest = %manifest.name);

    async {
        let mut report = LoadReport::default();
        for dataset in &manifest.datasets {
            report
                .datasets
                .push(load_dataset(client, base_url, dataset).await);
        }

        info!(
            total_points = report.total_points(),
            failed = report.failures().count(),
            "manifest loaded"
        );
        report
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::encode;
    use crate::point_cloud::Colors;
    use crate::resource::tests::MemoryClient;

    fn buildings() -> PointCloud {
        PointCloud::new(vec![1, -1, 4], vec![2, -2, 5], vec![3, -3, 6]).unwrap()
    }

    fn vegetation() -> PointCloud {
        let colors = Colors::new(vec![10, 20], vec![30, 40], vec![50, 60]);
        PointCloud::with_colors(vec![7, 8], vec![9, 10], vec![11, 12], colors).unwrap()
    }

    fn manifest() -> Manifest {
        Manifest::from_slice(
            br#"{ "name": "park", "datasets": [
                { "name": "Buildings", "file": "buildings.bin" },
                { "name": "Vegetation", "file": "green.bin", "colored": true }
            ] }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn loads_single_resource() {
        let client = MemoryClient::default().with("mem://b.bin", encode(&vegetation()));
        let resource = Resource::new("mem://b.bin", &client);

        let cloud = load_point_cloud(&resource, true).await.unwrap();
        assert_eq!(cloud, vegetation());
    }

    #[tokio::test]
    async fn missing_resource_is_a_resource_error() {
        let client = MemoryClient::default();
        let resource = Resource::new("mem://none.bin", &client);

        let result = load_point_cloud(&resource, false).await;
        assert!(matches!(
            result,
            Err(LoadPointCloudError::Resource(ResourceError::Status(404)))
        ));
    }

    #[tokio::test]
    async fn sums_points_over_datasets() {
        let client = MemoryClient::default()
            .with("mem://park/buildings.bin", encode(&buildings()))
            .with("mem://park/green.bin", encode(&vegetation()));

        let report = load_manifest(&client, "mem://park", &manifest()).await;

        assert!(report.is_complete());
        assert_eq!(report.total_points(), 5);
        assert_eq!(report.get("Buildings").unwrap().cloud(), Some(&buildings()));
        assert_eq!(report.get("Vegetation").unwrap().cloud(), Some(&vegetation()));
        let names: Vec<_> = report.loaded().map(|(name, _)| name).collect();
        assert_eq!(names, ["Buildings", "Vegetation"]);
    }

    #[tokio::test]
    async fn failed_dataset_does_not_affect_others() {
        let mut truncated = encode(&vegetation());
        truncated.pop();
        let client = MemoryClient::default()
            .with("mem://park/buildings.bin", encode(&buildings()))
            .with("mem://park/green.bin", truncated);

        let report = load_manifest(&client, "mem://park/", &manifest()).await;

        assert!(!report.is_complete());
        assert_eq!(report.total_points(), 3);
        assert_eq!(report.get("Buildings").unwrap().cloud(), Some(&buildings()));

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "Vegetation");
        assert!(matches!(
            failures[0].1,
            LoadPointCloudError::Decode(DecodeError::TruncatedBuffer { .. })
        ));
    }
}
