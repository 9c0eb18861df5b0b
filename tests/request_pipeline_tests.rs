//! End-to-end request handling: format gate, model fetch, slicing, estimation
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use gcode_cost::error::Result;
use gcode_cost::pipeline::process_request;
use gcode_cost::slicer::{PrusaSlicer, SliceJob, Slicer};
use gcode_cost::{EstimateError, EstimateRequest, Estimator};
use tempfile::TempDir;

const SLICED: &str = "\
; generated by test slicer
M83
G1 X1 E1000
; filament used [mm] = 1000.0
; estimated printing time (normal mode) = 1m 30s
";

/// In-process slicer that records each call and writes fixed G-code
#[derive(Default)]
struct RecordingSlicer {
    calls: RefCell<Vec<(PathBuf, String, bool)>>,
}

impl Slicer for RecordingSlicer {
    fn slice(&self, model: &Path, output: &Path, job: &SliceJob) -> Result<()> {
        let contents = fs::read_to_string(model)?;
        self.calls
            .borrow_mut()
            .push((model.to_path_buf(), contents, job.supports));
        fs::write(output, SLICED)?;
        Ok(())
    }
}

fn profiles_dir() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for name in ["base.ini", "pla.ini", "petg.ini", "standard.ini"] {
        fs::write(dir.path().join(name), "# profile\n").expect("write profile");
    }
    dir
}

fn local_model(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "solid cube\nendsolid cube\n").expect("write model");
    path
}

#[test]
fn test_local_model_is_fetched_sliced_and_estimated() {
    let profiles = profiles_dir();
    let models = TempDir::new().expect("create temp dir");
    let model = local_model(models.path(), "cube.stl");

    let request = EstimateRequest {
        supports: true,
        copies: 3,
        ..EstimateRequest::for_url(model.to_string_lossy())
    };
    let slicer = RecordingSlicer::default();

    let result = process_request(&Estimator::default(), &request, &slicer, profiles.path())
        .expect("process request");

    assert_eq!(result.print_time_seconds, 270);
    assert_eq!(result.filament_grams, 8.95);
    assert!(result.diagnostics.is_none());

    let calls = slicer.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (fetched, contents, supports) = &calls[0];
    assert_eq!(fetched.file_name().unwrap(), "cube.stl");
    assert_ne!(fetched, &model, "model should be copied into a scratch directory");
    assert_eq!(contents, "solid cube\nendsolid cube\n");
    assert!(supports);
}

#[test]
fn test_file_url_and_material_density() {
    let profiles = profiles_dir();
    let models = TempDir::new().expect("create temp dir");
    let model = local_model(models.path(), "bracket.3mf");

    let request = EstimateRequest {
        material: "PETG".to_string(),
        ..EstimateRequest::for_url(format!("file://{}", model.display()))
    };

    let result = process_request(
        &Estimator::default(),
        &request,
        &RecordingSlicer::default(),
        profiles.path(),
    )
    .expect("process request");

    assert_eq!(result.print_time_seconds, 90);
    assert_eq!(result.filament_grams, 3.05);
}

#[test]
fn test_unsupported_format_rejected_before_slicing() {
    let profiles = profiles_dir();
    let slicer = RecordingSlicer::default();
    let request = EstimateRequest::for_url("https://cdn.example.com/part.obj");

    let err = process_request(&Estimator::default(), &request, &slicer, profiles.path())
        .unwrap_err();

    assert!(matches!(err, EstimateError::UnsupportedFormat(ref name) if name == "part.obj"));
    assert!(slicer.calls.borrow().is_empty());
}

#[test]
fn test_missing_profiles_rejected_before_fetch() {
    let profiles = TempDir::new().expect("create temp dir");
    let slicer = RecordingSlicer::default();
    let request = EstimateRequest::for_url("/nonexistent/cube.stl");

    let err = process_request(&Estimator::default(), &request, &slicer, profiles.path())
        .unwrap_err();

    assert!(matches!(err, EstimateError::MissingProfiles(ref missing) if missing.len() == 3));
    assert!(slicer.calls.borrow().is_empty());
}

#[test]
fn test_unreachable_model_is_upstream_failure() {
    let profiles = profiles_dir();
    let slicer = RecordingSlicer::default();
    let request = EstimateRequest::for_url("/nonexistent/cube.stl");

    let err = process_request(&Estimator::default(), &request, &slicer, profiles.path())
        .unwrap_err();

    assert!(matches!(err, EstimateError::Upstream(_)));
    assert_eq!(err.classify(), gcode_cost::FaultClass::Server);
    assert!(slicer.calls.borrow().is_empty());
}

#[test]
fn test_failed_download_is_upstream_failure() {
    let profiles = profiles_dir();
    let slicer = RecordingSlicer::default();
    // Port 1 on loopback refuses connections without touching the network
    let request = EstimateRequest::for_url("http://127.0.0.1:1/cube.stl");

    let err = process_request(&Estimator::default(), &request, &slicer, profiles.path())
        .unwrap_err();

    match err {
        EstimateError::Upstream(message) => assert!(message.starts_with("download failed")),
        other => panic!("Expected upstream failure, got {other:?}"),
    }
    assert!(slicer.calls.borrow().is_empty());
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    path
}

#[cfg(unix)]
#[test]
fn test_scripted_slicer_through_request() {
    let profiles = profiles_dir();
    let models = TempDir::new().expect("create temp dir");
    let model = local_model(models.path(), "cube.stl");

    let script = write_script(
        models.path(),
        "fake-slicer",
        r#"for arg in "$@"; do
  case "$arg" in
    --output=*) out="${arg#--output=}" ;;
  esac
  model="$arg"
done
grep -q 'solid cube' "$model" || exit 7
printf 'M83\nG1 X1 E1000\n; estimated printing time (normal mode) = 2m 5s\n' > "$out"
"#,
    );

    let request = EstimateRequest::from_json(&format!(
        r#"{{"file_url": "{}", "copies": 2}}"#,
        model.display()
    ))
    .expect("parse request");

    let result = process_request(
        &Estimator::default(),
        &request,
        &PrusaSlicer::new(&script),
        profiles.path(),
    )
    .expect("process request");

    assert_eq!(result.print_time_seconds, 250);
    assert_eq!(result.filament_grams, 5.97);
}
