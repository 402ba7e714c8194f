//! Load every dataset of a manifest and print what was decoded.
//!
//! `cargo run --example read_native -- assets/park/manifest.json`
//!
//! With `--features reqwest` the manifest (and the files it lists) may also
//! live behind an `http://` or `https://` url.

use lidar_bin::resource::Resource;
use lidar_bin::{load_manifest, parse_manifest};

#[cfg(feature = "reqwest")]
fn client() -> lidar_bin::resource::hybrid::HybridClient<lidar_bin::resource::reqwest::ReqwestClient> {
    lidar_bin::resource::hybrid::HybridClient::new(lidar_bin::resource::reqwest::ReqwestClient::new())
}

#[cfg(not(feature = "reqwest"))]
fn client() -> lidar_bin::resource::file::FileClient {
    lidar_bin::resource::file::FileClient
}

fn manifest_url(arg: &str) -> String {
    if arg.starts_with("http://") || arg.starts_with("https://") || arg.starts_with("file://") {
        arg.to_string()
    } else {
        let path = std::fs::canonicalize(arg).unwrap();
        format!("file://{}", path.display())
    }
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    tracing_subscriber::fmt::init();

    let arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/park/manifest.json".to_string());
    let manifest_url = manifest_url(&arg);
    let base_url = manifest_url
        .rsplit_once('/')
        .map(|(base, _)| base.to_string())
        .unwrap_or_default();

    let client = client();
    let manifest_resource = Resource::new(&manifest_url, &client);
    let manifest = parse_manifest(&manifest_resource).await.unwrap();

    let report = load_manifest(&client, &base_url, &manifest).await;

    for (name, cloud) in report.loaded() {
        println!(
            "{name}: {} points, colored: {}, bounds: {:?}",
            cloud.point_count(),
            cloud.is_colored(),
            cloud.bounds()
        );
    }
    for (name, error) in report.failures() {
        println!("{name}: {error}");
    }

    println!("{} | {} data points", manifest.name, report.total_points());
}
