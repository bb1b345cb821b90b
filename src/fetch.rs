use std::sync::Arc;
use std::time::Duration;

use crate::error::DashboardError;

/// Download the sidebar image.
///
/// One blocking GET, no retries. Callers treat the error as non-fatal and
/// render the sidebar without the image.
pub fn fetch_sidebar_image(url: &str, timeout: Duration) -> Result<Arc<[u8]>, DashboardError> {
    let network = |source: reqwest::Error| DashboardError::Network {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(network)?;

    let response = client.get(url).send().map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DashboardError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response.bytes().map_err(network)?;
    if bytes.is_empty() {
        return Err(DashboardError::EmptyImage(url.to_string()));
    }

    log::info!("Fetched sidebar image ({} bytes) from {url}", bytes.len());
    Ok(Arc::from(bytes.as_ref()))
}
