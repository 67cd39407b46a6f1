use crate::error::{PipelineError, TrainpackResult};
use crate::layout::{ARCHIVE_ROOT_NAME, RunLayout};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Stage the trained artifacts, archive them, and clean up the staging tree.
///
/// The staging tree mirrors the archive layout
/// (`trained_model/<framework>/saved_model/...`) so entries can be appended
/// relative to the staging root. On archive failure the staging tree is left
/// in place for diagnosis; it is removed only after the archive is written.
///
/// Returns the archive path.
pub fn stage_and_archive(layout: &RunLayout, framework: &str) -> TrainpackResult<PathBuf> {
    if framework.trim().is_empty() {
        return Err(PipelineError::Customization(
            "framework label is empty; the archive layout template was never filled in".to_string(),
        ));
    }

    let stage_saved = layout.staging_framework_dir(framework).join("saved_model");
    fs::create_dir_all(&stage_saved)
        .map_err(|err| PipelineError::Packaging(format!("could not create staging tree: {err}")))?;

    let saved_model = layout.saved_model_dir();
    if saved_model.is_dir() {
        copy_tree(&saved_model, &stage_saved).map_err(|err| {
            PipelineError::Packaging(format!(
                "could not stage {}: {err}",
                saved_model.display()
            ))
        })?;
    }

    let archive_path = layout.archive_path();
    create_archive(&layout.staging_root(), &archive_path).map_err(|err| {
        PipelineError::Packaging(format!("could not write {}: {err}", archive_path.display()))
    })?;
    info!("wrote archive {}", archive_path.display());

    fs::remove_dir_all(layout.staging_root())
        .map_err(|err| PipelineError::Packaging(format!("could not remove staging tree: {err}")))?;
    Ok(archive_path)
}

/// Recursively copy `src` into `dst`. Symlinks are followed, so a link inside
/// the saved model is materialized as the file or directory it points to; the
/// archive must stay self-contained once it leaves this machine.
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn create_archive(staging_root: &Path, archive_path: &Path) -> io::Result<()> {
    let file = File::create(archive_path)?;
    let enc = GzEncoder::new(file, Compression::default());
    let mut tar = tar::Builder::new(enc);

    // Entries are relative to the staging root, so the archive root is
    // `trained_model/...` rather than an absolute path.
    tar.append_dir_all(ARCHIVE_ROOT_NAME, staging_root.join(ARCHIVE_ROOT_NAME))?;
    tar.into_inner()?.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use tempfile::TempDir;

    fn archive_entries(path: &Path) -> Vec<String> {
        let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
        archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().display().to_string())
            .collect()
    }

    #[test]
    fn test_empty_framework_is_a_customization_error() {
        let temp = TempDir::new().unwrap();
        let layout = RunLayout::new(temp.path());

        let err = stage_and_archive(&layout, "  ").unwrap_err();
        assert_eq!(err.exit_code(), 4);
        // Nothing staged, nothing archived.
        assert!(!layout.staging_root().exists());
        assert!(!layout.archive_path().exists());
    }

    #[test]
    fn test_archive_contains_saved_model_and_staging_is_removed() {
        let temp = TempDir::new().unwrap();
        let layout = RunLayout::new(temp.path());
        let saved = layout.saved_model_dir();
        fs::create_dir_all(saved.join("variables")).unwrap();
        fs::write(saved.join("saved_model.pb"), b"weights").unwrap();
        fs::write(saved.join("variables").join("variables.index"), b"idx").unwrap();

        let archive_path = stage_and_archive(&layout, "tensorflow").unwrap();

        assert_eq!(archive_path, layout.archive_path());
        assert!(!layout.staging_root().exists());

        let entries = archive_entries(&archive_path);
        assert!(entries.iter().all(|p| p.starts_with("trained_model")));
        assert!(entries.contains(&"trained_model/tensorflow/saved_model/saved_model.pb".to_string()));
        assert!(entries
            .contains(&"trained_model/tensorflow/saved_model/variables/variables.index".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_materialized_in_staging() {
        let temp = TempDir::new().unwrap();
        let layout = RunLayout::new(temp.path());
        let saved = layout.saved_model_dir();
        fs::create_dir_all(saved.join("assets")).unwrap();
        fs::write(saved.join("assets").join("vocab.txt"), b"tokens").unwrap();
        std::os::unix::fs::symlink(saved.join("assets"), saved.join("assets.extra")).unwrap();
        std::os::unix::fs::symlink(
            saved.join("assets").join("vocab.txt"),
            saved.join("vocab_link.txt"),
        )
        .unwrap();

        let archive_path = stage_and_archive(&layout, "tensorflow").unwrap();

        let entries = archive_entries(&archive_path);
        assert!(entries
            .contains(&"trained_model/tensorflow/saved_model/assets.extra/vocab.txt".to_string()));
        assert!(entries.contains(&"trained_model/tensorflow/saved_model/vocab_link.txt".to_string()));
    }

    #[test]
    fn test_missing_saved_model_still_produces_archive() {
        let temp = TempDir::new().unwrap();
        let layout = RunLayout::new(temp.path());

        let archive_path = stage_and_archive(&layout, "tensorflow").unwrap();
        assert!(archive_path.is_file());
        assert!(!layout.staging_root().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_archive_failure_leaves_staging_for_diagnosis() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let result_dir = temp.path().join("results");
        fs::create_dir_all(&result_dir).unwrap();
        let layout = RunLayout::new(&result_dir);
        fs::create_dir_all(layout.saved_model_dir()).unwrap();

        // Stage first so the staging tree exists, then make the result
        // directory unwritable so the archive file cannot be created.
        fs::create_dir_all(layout.staging_framework_dir("tensorflow").join("saved_model")).unwrap();
        fs::set_permissions(&result_dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores permission bits; skip when the directory stayed writable.
        let marker = result_dir.join("writable_marker");
        if fs::write(&marker, b"x").is_ok() {
            let _ = fs::remove_file(&marker);
            fs::set_permissions(&result_dir, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let err = stage_and_archive(&layout, "tensorflow").unwrap_err();
        fs::set_permissions(&result_dir, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(err.exit_code(), 3);
        assert!(layout.staging_root().is_dir());
        assert!(!layout.archive_path().exists());
    }
}
