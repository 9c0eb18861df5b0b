//! External slicer boundary.
//!
//! Resolves the layered profile set for a job and runs the slicer
//! executable to turn a model into G-code.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::error::{EstimateError, Result};

/// The three layered slicer profiles: base, material, quality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSet {
    pub base: PathBuf,
    pub material: PathBuf,
    pub quality: PathBuf,
}

impl ProfileSet {
    /// Locate `base.ini`, `<material>.ini` (lower-cased) and `<quality>.ini` in `dir`
    pub fn resolve(dir: &Path, material: &str, quality: &str) -> Result<Self> {
        let profiles = Self {
            base: dir.join("base.ini"),
            material: dir.join(format!("{}.ini", material.to_lowercase())),
            quality: dir.join(format!("{quality}.ini")),
        };

        let missing: Vec<String> = profiles
            .layers()
            .iter()
            .filter(|path| !path.is_file())
            .map(|path| path.display().to_string())
            .collect();

        if missing.is_empty() {
            Ok(profiles)
        } else {
            Err(EstimateError::MissingProfiles(missing))
        }
    }

    /// Profiles in load order; later layers override earlier ones
    pub fn layers(&self) -> [&Path; 3] {
        [
            self.base.as_path(),
            self.material.as_path(),
            self.quality.as_path(),
        ]
    }
}

/// One slicing job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceJob {
    pub profiles: ProfileSet,
    pub supports: bool,
}

/// Something that turns a model file into G-code
pub trait Slicer {
    fn slice(&self, model: &Path, output: &Path, job: &SliceJob) -> Result<()>;
}

/// PrusaSlicer command-line driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrusaSlicer {
    program: PathBuf,
}

impl Default for PrusaSlicer {
    fn default() -> Self {
        Self::new("prusa-slicer")
    }
}

impl PrusaSlicer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the slicer for `job`
    pub fn arguments(&self, model: &Path, output: &Path, job: &SliceJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--slice".into()];

        for layer in job.profiles.layers() {
            args.push("--load".into());
            args.push(layer.into());
        }

        if job.supports {
            args.push("--support-material".into());
        }

        let mut output_arg = OsString::from("--output=");
        output_arg.push(output);

        args.push("--export-gcode".into());
        args.push(output_arg);
        args.push(model.into());
        args
    }
}

impl Slicer for PrusaSlicer {
    fn slice(&self, model: &Path, output: &Path, job: &SliceJob) -> Result<()> {
        let args = self.arguments(model, output, job);
        debug!("running {} {:?}", self.program.display(), args);

        let out = Command::new(&self.program).args(&args).output().map_err(|e| {
            EstimateError::upstream(&format!(
                "failed to start {}: {}",
                self.program.display(),
                e
            ))
        })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let detail = if stderr.trim().is_empty() {
                String::from_utf8_lossy(&out.stdout)
            } else {
                stderr
            };
            return Err(EstimateError::upstream(&detail));
        }

        info!("sliced {} -> {}", model.display(), output.display());
        Ok(())
    }
}
