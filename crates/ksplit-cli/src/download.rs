//! Downloads the upstream Kubernetes OpenAPI document for a given release.

use semver::Version;
use tracing::info;

use crate::error::{CliError, Result};

#[derive(Debug)]
pub struct SwaggerData {
    pub bytes: Vec<u8>,
    pub kubernetes_version: String,
}

/// Download the swagger document published for the given Kubernetes
/// release tag. `kube_version` may carry a leading `v` (stripped before
/// parsing, since `semver::Version::parse` is strict unlike Go's
/// tolerant parser).
pub fn download_swagger(kube_version: &str) -> Result<SwaggerData> {
    let trimmed = kube_version.strip_prefix('v').unwrap_or(kube_version);
    let version = Version::parse(trimmed).map_err(|source| CliError::InvalidVersion {
        version: kube_version.to_string(),
        source,
    })?;

    let download_url = format!(
        "https://github.com/kubernetes/kubernetes/raw/v{}.{}.{}/api/openapi-spec/swagger.json",
        version.major, version.minor, version.patch
    );

    info!(version = %version, url = %download_url, "downloading swagger file");

    let response =
        reqwest::blocking::get(&download_url).map_err(|source| CliError::Download {
            url: download_url.clone(),
            source,
        })?;

    let status = response.status();
    let bytes = response
        .bytes()
        .map_err(|source| CliError::Download {
            url: download_url.clone(),
            source,
        })?
        .to_vec();

    if !status.is_success() {
        return Err(CliError::DownloadStatus {
            url: download_url,
            status: status.as_u16(),
        });
    }

    Ok(SwaggerData {
        bytes,
        kubernetes_version: format!("v{version}"),
    })
}
