use crate::config::ExtractConfig;
use std::path::{Path, PathBuf};

/// Derives dictionary namespace segments from a source file's location.
///
/// For `app/views/admin/users/edit.html.slim` with marker `views`, the
/// namespace is `["admin", "users", "edit"]`. Index-like file names
/// (`index`, `home`) add no segment of their own.
#[derive(Debug, Clone)]
pub struct NamespaceDeriver {
    project_root: PathBuf,
    marker_dir: String,
    index_names: Vec<String>,
}

impl NamespaceDeriver {
    pub fn new(project_root: impl Into<PathBuf>, config: &ExtractConfig) -> Self {
        Self {
            project_root: project_root.into(),
            marker_dir: config.marker_dir.clone(),
            index_names: config.index_names.clone(),
        }
    }

    pub fn derive(&self, file: &Path) -> Vec<String> {
        let parts = self.relative_parts(file);
        let marker = parts.iter().position(|p| *p == self.marker_dir);

        match marker {
            Some(idx) if idx + 1 < parts.len() => {
                let last = parts.len() - 1;
                let mut segments: Vec<String> = parts[idx + 1..last].to_vec();
                let file_stem = strip_extension(&parts[last]);
                if !self.index_names.iter().any(|name| *name == file_stem) {
                    segments.push(file_stem.to_string());
                }
                segments
            }
            _ => parts
                .last()
                .map(|name| vec![strip_extension(name).to_string()])
                .unwrap_or_default(),
        }
    }

    /// Path segments relative to the project root. Falls back to the bare
    /// file name when the file does not live under the root.
    fn relative_parts(&self, file: &Path) -> Vec<String> {
        match file.strip_prefix(&self.project_root) {
            Ok(relative) => split_segments(relative),
            Err(_) => {
                tracing::debug!(
                    "{} is outside {}, using file name as namespace",
                    file.display(),
                    self.project_root.display()
                );
                file.file_name()
                    .map(|name| vec![name.to_string_lossy().into_owned()])
                    .unwrap_or_else(|| split_segments(file))
            }
        }
    }
}

fn split_segments(path: &Path) -> Vec<String> {
    path.to_string_lossy()
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everything before the first `.` of a file name
fn strip_extension(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
