use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use eyre::Result;
use log::{debug, info};

/// On-disk store for cleaned resume text, so unchanged PDFs skip extraction.
#[derive(Debug, Clone)]
pub struct TextCache {
    dir: PathBuf,
}

impl TextCache {
    /// Initializes the cache directory if it doesn't exist
    pub fn init(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("created text cache directory: {}", dir.display());
        }
        Ok(Self { dir })
    }

    /// Generates a cache key from the file stem and extension, a hash of the
    /// full path, size and modification time. Returns `None` when the
    /// metadata can't be read.
    fn cache_key(source: &Path) -> Option<String> {
        let metadata = fs::metadata(source).ok()?;
        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let stem = source.file_stem()?.to_string_lossy().replace(['/', '\\'], "-");
        let ext = source
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        let full_path = fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        let path_hash = blake3::hash(full_path.to_string_lossy().as_bytes()).to_hex();

        Some(format!(
            "{}-{}-{}-{}-{}",
            stem,
            ext,
            &path_hash[..16],
            metadata.len(),
            modified
        ))
    }

    fn cache_file(&self, source: &Path) -> Option<PathBuf> {
        Self::cache_key(source).map(|key| self.dir.join(format!("{}.txt", key)))
    }

    /// Retrieves cleaned text from cache if it exists
    pub fn get(&self, source: &Path) -> Option<String> {
        let cache_file = self.cache_file(source)?;
        if cache_file.exists() {
            match fs::read_to_string(&cache_file) {
                Ok(content) => {
                    debug!("loaded text from cache: {}", source.display());
                    return Some(content);
                }
                Err(e) => {
                    debug!("failed to read cached text for {}: {}", source.display(), e);
                }
            }
        }
        None
    }

    /// Stores cleaned text in cache
    pub fn put(&self, source: &Path, content: &str) -> Result<()> {
        let Some(cache_file) = self.cache_file(source) else {
            debug!("no cache key for {}, not caching", source.display());
            return Ok(());
        };
        fs::write(&cache_file, content)?;
        debug!("cached text for: {}", source.display());
        Ok(())
    }
}
