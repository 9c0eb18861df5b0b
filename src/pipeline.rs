//! Request pipeline.
//!
//! Takes an [`EstimateRequest`] through the whole flow: format gate,
//! model fetch into a scratch directory, slicing and estimation.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};

use crate::error::{EstimateError, Result};
use crate::estimate::{EstimationResult, Estimator};
use crate::request::EstimateRequest;
use crate::slicer::{ProfileSet, SliceJob, Slicer};

/// Upper bound on a model download
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(90);

/// Run `request` end to end and return its estimate.
///
/// Unsupported formats are rejected before anything is fetched or sliced.
pub fn process_request(
    estimator: &Estimator,
    request: &EstimateRequest,
    slicer: &dyn Slicer,
    profiles_dir: &Path,
) -> Result<EstimationResult> {
    let file_name = request.model_file_name()?;
    let job = SliceJob {
        profiles: ProfileSet::resolve(profiles_dir, &request.material, &request.quality)?,
        supports: request.supports,
    };

    let workdir = tempfile::tempdir()?;
    let model = workdir.path().join(file_name);
    let output = workdir.path().join("out.gcode");

    fetch_model(&request.file_url, &model)?;
    slicer.slice(&model, &output, &job)?;

    let document = read_gcode(&output)?;
    estimator.estimate(&document, &request.params())
}

/// Copy the model named by `source` to `dest`.
///
/// `http://` and `https://` sources are downloaded; anything else
/// (including `file://` URLs) is read from the local filesystem.
pub fn fetch_model(source: &str, dest: &Path) -> Result<()> {
    if is_remote(source) {
        download(source, dest)
    } else {
        let path = local_path(source);
        debug!("copying local model {}", path.display());
        fs::copy(&path, dest).map_err(|e| {
            EstimateError::upstream(&format!("failed to read model {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}

fn download(url: &str, dest: &Path) -> Result<()> {
    info!("downloading {}", url);

    let response = ureq::get(url)
        .timeout(DOWNLOAD_TIMEOUT)
        .call()
        .map_err(|e| EstimateError::upstream(&format!("download failed: {e}")))?;

    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| EstimateError::upstream(&format!("download failed: {e}")))?;

    fs::write(dest, &body)?;
    debug!("downloaded {} bytes to {}", body.len(), dest.display());
    Ok(())
}

fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn local_path(source: &str) -> PathBuf {
    let path = source.strip_prefix("file://").unwrap_or(source);
    PathBuf::from(path.split(['?', '#']).next().unwrap_or(path))
}

/// Read G-code, replacing invalid UTF-8 rather than failing
pub fn read_gcode(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
