//! Frame source backed by a directory of container files.
//!
//! Frames are matched by file-name prefix and extension (case-insensitive) and
//! ordered by a natural sort key, so `h_2` comes before `h_10`.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::light_field::common::error::{EpiError, Result};
use crate::light_field::container::{parse, ImageBlob};
use crate::light_field::epi::FrameStack;
use super::source::FrameSource;

pub const DEFAULT_EXTENSION: &str = "imgb";

#[derive(Debug, Clone)]
pub struct DirectoryFrameSource {
    dir: PathBuf,
    extension: String,
}

impl DirectoryFrameSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of the frames for `prefix`, naturally sorted by file name.
    pub fn list(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| EpiError::InputReadError(format!("{}: {}", self.dir.display(), e)))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| EpiError::InputReadError(format!("{}: {}", self.dir.display(), e)))?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with(prefix) && self.has_extension(&name) {
                names.push(name);
            }
        }

        names.sort_by(|a, b| natural_cmp(a, b));
        Ok(names.into_iter().map(|n| self.dir.join(n)).collect())
    }

    fn has_extension(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

impl FrameSource for DirectoryFrameSource {
    fn load_stack(&self, prefix: &str) -> Result<FrameStack> {
        let paths = self.list(prefix)?;
        if paths.is_empty() {
            return Err(EpiError::InputReadError(format!(
                "no '{}*.{}' frames in {}",
                prefix,
                self.extension,
                self.dir.display()
            )));
        }

        let mut frames = Vec::with_capacity(paths.len());
        for (i, path) in paths.iter().enumerate() {
            debug!("Reading frame {}", path.display());
            let bytes = fs::read(path)
                .map_err(|e| EpiError::InputReadError(format!("{}: {}", path.display(), e)))?;
            frames.push(parse(&bytes).map_err(|e| e.in_frame(i))?);
        }

        info!(prefix, count = frames.len(), dir = %self.dir.display(), "Frame stack loaded");
        FrameStack::new(frames)
    }
}

/// Writes a blob as a container file, creating parent directories.
pub fn save_blob<P: AsRef<Path>>(path: P, blob: &ImageBlob) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| EpiError::OutputWriteError(format!("{}: {}", parent.display(), e)))?;
    }
    fs::write(path, blob.to_bytes())
        .map_err(|e| EpiError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum KeyPart {
    Text(String),
    // significant digit count first, so longer numbers sort later
    Number(usize, String),
}

/// Splits a name into alternating text and digit runs. Text is lowercased and
/// digit runs compare numerically.
fn natural_key(name: &str) -> Vec<KeyPart> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for ch in name.chars() {
        let is_digit = ch.is_ascii_digit();
        if is_digit != in_digits {
            parts.push(finish_part(&current, in_digits));
            current.clear();
            in_digits = is_digit;
        }
        current.push(ch);
    }
    parts.push(finish_part(&current, in_digits));
    parts
}

fn finish_part(run: &str, digits: bool) -> KeyPart {
    if digits {
        let trimmed = run.trim_start_matches('0');
        KeyPart::Number(trimmed.len(), trimmed.to_string())
    } else {
        KeyPart::Text(run.to_lowercase())
    }
}

/// Natural ordering of file names; exact byte order breaks ties.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b)).then_with(|| a.cmp(b))
}
