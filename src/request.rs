//! Estimation request model and the model-format gate.

use serde::Deserialize;

use crate::error::{EstimateError, Result};
use crate::estimate::EstimateParams;

/// Model file extensions accepted for slicing
pub const SUPPORTED_MODEL_EXTENSIONS: [&str; 2] = ["stl", "3mf"];

/// A request to estimate the cost of printing a model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EstimateRequest {
    pub file_url: String,
    #[serde(default = "default_material")]
    pub material: String,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default)]
    pub supports: bool,
    #[serde(default = "default_copies")]
    pub copies: i64,
}

fn default_material() -> String {
    "PLA".to_string()
}

fn default_quality() -> String {
    "standard".to_string()
}

fn default_copies() -> i64 {
    1
}

/// Wire shape: a full request object, or just the URL as a string
#[derive(Deserialize)]
#[serde(untagged)]
enum RequestBody {
    Full(EstimateRequest),
    UrlOnly(String),
}

impl EstimateRequest {
    /// Request with all defaults for the given URL
    pub fn for_url(file_url: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
            material: default_material(),
            quality: default_quality(),
            supports: false,
            copies: default_copies(),
        }
    }

    /// Parse a JSON request body (object or bare URL string)
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        Ok(match serde_json::from_str::<RequestBody>(body)? {
            RequestBody::Full(request) => request,
            RequestBody::UrlOnly(url) => Self::for_url(url),
        })
    }

    /// File name of the model, rejecting unsupported formats
    pub fn model_file_name(&self) -> Result<&str> {
        model_file_name(&self.file_url)
    }

    pub fn params(&self) -> EstimateParams {
        EstimateParams::new(self.material.clone(), self.copies)
    }
}

/// Last path segment of `url` (query and fragment stripped), if it names
/// an STL or 3MF file.
pub fn model_file_name(url: &str) -> Result<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let name = path.rsplit(['/', '\\']).next().unwrap_or_default();

    let supported = name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| {
            !stem.is_empty()
                && SUPPORTED_MODEL_EXTENSIONS
                    .iter()
                    .any(|s| ext.eq_ignore_ascii_case(s))
        });

    if supported {
        Ok(name)
    } else {
        Err(EstimateError::UnsupportedFormat(name.to_string()))
    }
}
