use std::path::{Path, PathBuf};

/// Name of the ephemeral staging directory under the result directory.
pub const STAGING_DIR_NAME: &str = "output";
/// Top-level directory inside the archive.
pub const ARCHIVE_ROOT_NAME: &str = "trained_model";
/// Final artifact name under the result directory.
pub const ARCHIVE_FILE_NAME: &str = "model_training_output.tar.gz";

/// Filesystem layout of a training run inside the result directory.
///
/// ```text
/// <result_dir>/model/saved_model            written by the training program
/// <result_dir>/model/checkpoint/checkpoint  patched in place, if present
/// <result_dir>/output/...                   ephemeral staging tree
/// <result_dir>/model_training_output.tar.gz final artifact
/// ```
#[derive(Debug, Clone)]
pub struct RunLayout {
    result_dir: PathBuf,
}

impl RunLayout {
    #[must_use]
    pub fn new(result_dir: &Path) -> Self {
        Self { result_dir: result_dir.to_path_buf() }
    }

    #[must_use]
    pub fn result_dir(&self) -> &Path {
        &self.result_dir
    }

    #[must_use]
    pub fn model_dir(&self) -> PathBuf {
        self.result_dir.join("model")
    }

    #[must_use]
    pub fn saved_model_dir(&self) -> PathBuf {
        self.model_dir().join("saved_model")
    }

    #[must_use]
    pub fn checkpoint_dir(&self) -> PathBuf {
        self.model_dir().join("checkpoint")
    }

    #[must_use]
    pub fn checkpoint_file(&self) -> PathBuf {
        self.checkpoint_dir().join("checkpoint")
    }

    #[must_use]
    pub fn staging_root(&self) -> PathBuf {
        self.result_dir.join(STAGING_DIR_NAME)
    }

    /// Staging directory for one framework: `output/trained_model/<framework>`.
    #[must_use]
    pub fn staging_framework_dir(&self, framework: &str) -> PathBuf {
        self.staging_root().join(ARCHIVE_ROOT_NAME).join(framework)
    }

    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.result_dir.join(ARCHIVE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = RunLayout::new(Path::new("/results"));

        assert_eq!(layout.saved_model_dir(), Path::new("/results/model/saved_model"));
        assert_eq!(layout.checkpoint_file(), Path::new("/results/model/checkpoint/checkpoint"));
        assert_eq!(layout.staging_root(), Path::new("/results/output"));
        assert_eq!(
            layout.staging_framework_dir("tensorflow"),
            Path::new("/results/output/trained_model/tensorflow")
        );
        assert_eq!(layout.archive_path(), Path::new("/results/model_training_output.tar.gz"));
    }
}
