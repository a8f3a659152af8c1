//! Integration tests for the enumerate -> dispatch -> aggregate pipeline.

use indoc::indoc;
use linestat::config::{LinestatConfig, ParallelConfig};
use linestat::progress::ProgressConfig;
use linestat::{
    analyze_directory, CancelToken, Error, FailurePolicy, FileStats, LineRule, SummaryMode,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a temp directory with test files.
fn create_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for (name, content) in files {
        let file_path = temp_dir.path().join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
    }
    temp_dir
}

fn quiet() -> ProgressConfig {
    ProgressConfig { quiet_mode: true }
}

fn run(root: &Path, settings: &LinestatConfig) -> linestat::Result<linestat::Analysis> {
    analyze_directory(root, settings, &quiet(), &CancelToken::new())
}

#[test]
fn test_single_file_two_lines() {
    let dir = create_tree(&[("only.txt", "abc\nde\n")]);
    let analysis = run(dir.path(), &LinestatConfig::default()).unwrap();

    let file = dir.path().join("only.txt");
    let stats = &analysis.files[&file];
    assert_eq!(stats.line_lengths(), &[3, 2]);
    assert_eq!(stats.max(), 3);
    assert_eq!(stats.mean(), 2.5);
    assert_eq!(stats.median(), 2.5);

    assert_eq!(analysis.summary.overall_mean, 2.5);
    assert_eq!(analysis.summary.overall_median, 2.5);
    assert_eq!(analysis.summary.max_file, file);
    assert_eq!(analysis.summary.max_value, 3);
}

#[test]
fn test_single_empty_file() {
    let dir = create_tree(&[("empty.txt", "")]);
    let analysis = run(dir.path(), &LinestatConfig::default()).unwrap();

    let stats = &analysis.files[&dir.path().join("empty.txt")];
    assert_eq!(stats, &FileStats::from_lengths(vec![0]));
    assert_eq!(analysis.summary.overall_mean, 0.0);
    assert_eq!(analysis.summary.overall_median, 0.0);
    assert_eq!(analysis.summary.max_value, 0);
}

#[test]
fn test_max_file_independent_of_order() {
    let a = "x".repeat(10) + "\n";
    let b = "y".repeat(20) + "\n";
    let dir = create_tree(&[("a.txt", a.as_str()), ("nested/b.txt", b.as_str())]);

    for workers in [1, 2, 8] {
        let settings = LinestatConfig {
            parallelism: ParallelConfig::with_workers(workers),
            ..Default::default()
        };
        let analysis = run(dir.path(), &settings).unwrap();
        assert_eq!(analysis.summary.max_file, dir.path().join("nested/b.txt"));
        assert_eq!(analysis.summary.max_value, 20);
    }
}

#[test]
fn test_empty_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let err = run(dir.path(), &LinestatConfig::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyCorpus));
}

#[test]
fn test_regular_file_root_is_rejected() {
    let dir = create_tree(&[("plain.txt", "abc\n")]);
    let root = dir.path().join("plain.txt");

    let err = run(&root, &LinestatConfig::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidDirectory { ref path } if *path == root));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_mean_of_means_is_not_the_pooled_mean() {
    let dir = create_tree(&[
        ("short.txt", "0123456789\n"),
        ("long.txt", "ab\nab\nab\n"),
    ]);

    let default = run(dir.path(), &LinestatConfig::default()).unwrap();
    assert_eq!(default.summary.overall_mean, 6.0);
    assert_eq!(default.summary.mode, SummaryMode::MeanOfMeans);

    let mut pooled_settings = LinestatConfig::default();
    pooled_settings.analysis.summary_mode = SummaryMode::Pooled;
    let pooled = run(dir.path(), &pooled_settings).unwrap();
    assert_eq!(pooled.summary.overall_mean, 4.0);
    assert_eq!(pooled.summary.overall_median, 2.0);
}

#[test]
fn test_trimmed_and_raw_rules() {
    let content = indoc! {"
        fn main() {

            println!();
        }
    "};
    let dir = create_tree(&[("main.rs", content)]);
    let file = dir.path().join("main.rs");

    let trimmed = run(dir.path(), &LinestatConfig::default()).unwrap();
    assert_eq!(trimmed.files[&file].line_lengths(), &[11, 15, 1]);

    let mut raw_settings = LinestatConfig::default();
    raw_settings.analysis.line_rule = LineRule::Raw;
    let raw = run(dir.path(), &raw_settings).unwrap();
    assert_eq!(raw.files[&file].line_lengths(), &[12, 1, 16, 2]);
}

#[test]
fn test_repeated_runs_are_identical() {
    let files: Vec<(String, String)> = (0..30)
        .map(|i| {
            let body: String = (0..i % 7)
                .map(|j| "z".repeat((i * 3 + j) % 40) + "\n")
                .collect();
            (format!("d{}/f{}.txt", i % 4, i), body)
        })
        .collect();
    let refs: Vec<(&str, &str)> = files.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect();
    let dir = create_tree(&refs);

    let first = run(dir.path(), &LinestatConfig::default()).unwrap();
    let second = run(dir.path(), &LinestatConfig::default()).unwrap();

    assert_eq!(first.files.len(), 30);
    assert_eq!(first.files, second.files);
    assert_eq!(first.summary, second.summary);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_fails_fast_or_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = create_tree(&[("ok.txt", "hello\n"), ("locked.txt", "secret\n")]);
    let locked = dir.path().join("locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Running as root ignores file permissions; nothing to test then
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let err = run(dir.path(), &LinestatConfig::default()).unwrap_err();
    assert!(matches!(err, Error::FileRead { ref path, .. } if *path == locked));

    let mut skipping = LinestatConfig::default();
    skipping.analysis.failure_policy = FailurePolicy::SkipUnreadable;
    let analysis = run(dir.path(), &skipping).unwrap();
    assert_eq!(analysis.files.len(), 1);
    assert_eq!(analysis.skipped.len(), 1);
    assert_eq!(analysis.skipped[0].path, locked);
    assert_eq!(analysis.summary.max_file, dir.path().join("ok.txt"));
}

#[test]
fn test_invalid_utf8_file_fails() {
    let dir = TempDir::new().unwrap();
    let path: PathBuf = dir.path().join("binary.bin");
    fs::write(&path, [0xffu8, 0xfe, 0x00, b'\n']).unwrap();

    let err = run(dir.path(), &LinestatConfig::default()).unwrap_err();
    assert_eq!(err.path(), Some(path.as_path()));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_not_analyzed() {
    use std::os::unix::fs::symlink;

    let dir = create_tree(&[("real/a.txt", "abcd\nef\n")]);
    symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

    let analysis = run(dir.path(), &LinestatConfig::default()).unwrap();
    let keys: Vec<&PathBuf> = analysis.files.keys().collect();
    assert_eq!(keys, vec![&dir.path().join("real/a.txt")]);
    assert_eq!(analysis.summary.max_value, 4);
}

#[test]
fn test_per_file_min_and_std_dev() {
    let dir = create_tree(&[("f.txt", "a\nabc\nabcde\n")]);
    let analysis = run(dir.path(), &LinestatConfig::default()).unwrap();

    let stats = &analysis.files[&dir.path().join("f.txt")];
    assert_eq!(stats.min(), 3);
    assert_eq!(stats.std_dev(), 2.0);
}
