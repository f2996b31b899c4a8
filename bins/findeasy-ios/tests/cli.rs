use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const METADATA: &str = "- (BOOL)sd_isHighDynamicRange {\n    return self.isHighDynamicRange;\n}\n";

const CODER: &str = "    decodingOptions[(__bridge NSString *)kCGImageSourceDecodeRequest] = (__bridge NSString *)kCGImageSourceDecodeToHDR;\n";

const RECORD_CONFIG: &str = "import AVFoundation\n\n#if os(iOS)\nstruct IosConfig {\n  init(map: [String: Any]) {}\n}\n#else\nstruct IosConfig {\n  init(map: [String: Any]) {}\n}\n#endif\n";

fn findeasy_ios(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("findeasy-ios").unwrap();
    cmd.current_dir(workdir).env_remove("PUB_CACHE").arg("--no-color");
    cmd
}

fn write(path: PathBuf, content: &str) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

struct Fixture {
    _temp: TempDir,
    project: PathBuf,
    cache: PathBuf,
    metadata: PathBuf,
    coder: PathBuf,
    record: PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("app");
    let cache = temp.path().join("cache");
    let core = project.join("ios/Pods/SDWebImage/SDWebImage/Core");

    let metadata = write(core.join("UIImage+Metadata.m"), METADATA);
    let coder = write(core.join("SDImageIOAnimatedCoder.m"), CODER);
    let record = write(
        cache.join("hosted/pub.dev/record_darwin-1.1.2/ios/Classes/RecordConfig.swift"),
        RECORD_CONFIG,
    );

    Fixture {
        _temp: temp,
        project,
        cache,
        metadata,
        coder,
        record,
    }
}

fn run_fix(fx: &Fixture, extra: &[&str]) -> assert_cmd::assert::Assert {
    findeasy_ios(&fx.project)
        .arg("fix")
        .arg("--project-root")
        .arg(&fx.project)
        .arg("--pub-cache")
        .arg(&fx.cache)
        .args(extra)
        .assert()
}

fn backup(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

#[test]
fn test_fix_patches_all_three_files() {
    let fx = fixture();

    run_fix(&fx, &[])
        .success()
        .stdout(predicate::str::contains("Modified 3 files"));

    let metadata = fs::read_to_string(&fx.metadata).unwrap();
    assert!(metadata.contains("return NO;"));

    let coder = fs::read_to_string(&fx.coder).unwrap();
    assert!(coder.starts_with("    // decodingOptions"));

    let record = fs::read_to_string(&fx.record).unwrap();
    assert!(record.contains("overrideMutedMicrophoneInterruption"));
    assert!(record.starts_with("import AVFoundation\n\n#if os(iOS)\n"));

    assert_eq!(fs::read_to_string(backup(&fx.metadata)).unwrap(), METADATA);
    assert_eq!(fs::read_to_string(backup(&fx.coder)).unwrap(), CODER);
    assert_eq!(fs::read_to_string(backup(&fx.record)).unwrap(), RECORD_CONFIG);
}

#[test]
fn test_fix_is_idempotent() {
    let fx = fixture();
    run_fix(&fx, &[]).success();
    let coder = fs::read_to_string(&fx.coder).unwrap();

    run_fix(&fx, &[])
        .success()
        .stdout(predicate::str::contains("Modified 0 files (3 unchanged)"));

    assert_eq!(fs::read_to_string(&fx.coder).unwrap(), coder);
    assert_eq!(fs::read_to_string(backup(&fx.coder)).unwrap(), CODER);
}

#[test]
fn test_dry_run_writes_nothing() {
    let fx = fixture();

    run_fix(&fx, &["--dry-run"])
        .success()
        .stdout(predicate::str::contains("Would modify 3 files"));

    assert_eq!(fs::read_to_string(&fx.metadata).unwrap(), METADATA);
    assert!(!backup(&fx.metadata).exists());
}

#[test]
fn test_no_backup_flag() {
    let fx = fixture();

    run_fix(&fx, &["--no-backup"]).success();

    assert!(fs::read_to_string(&fx.metadata).unwrap().contains("return NO;"));
    assert!(!backup(&fx.metadata).exists());
    assert!(!backup(&fx.record).exists());
}

#[test]
fn test_missing_pods_are_reported() {
    let fx = fixture();
    fs::remove_dir_all(fx.project.join("ios")).unwrap();

    run_fix(&fx, &[])
        .success()
        .stdout(predicate::str::contains("File not found"))
        .stdout(predicate::str::contains("Modified 1 file (2 not found)"));
}

#[test]
fn test_missing_record_package_warns() {
    let fx = fixture();
    fs::remove_dir_all(fx.cache.join("hosted/pub.dev/record_darwin-1.1.2")).unwrap();

    run_fix(&fx, &[])
        .success()
        .stderr(predicate::str::contains("record_darwin not found"))
        .stdout(predicate::str::contains("Modified 2 files"));
}
