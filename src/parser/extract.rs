use std::path::Path;
use std::sync::LazyLock;

use eyre::{Result, WrapErr, eyre};
use log::debug;
use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s.\-,]").expect("character filter regex is valid"));

/// Kind of document a resume path points at, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    PlainText,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" => Some(SourceKind::PlainText),
            _ => None,
        }
    }
}

/// Reads the full text of a resume. PDF pages come back newline separated.
pub fn extract_text(path: &Path) -> Result<String> {
    let kind = SourceKind::from_path(path)
        .ok_or_else(|| eyre!("unsupported resume format: {}", path.display()))?;

    debug!("extracting text from {} ({:?})", path.display(), kind);

    match kind {
        SourceKind::Pdf => {
            let bytes =
                std::fs::read(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                eyre!("failed to extract text from PDF '{}': {}", path.display(), e)
            })
        }
        SourceKind::PlainText => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display())),
    }
}

/// Collapses whitespace runs, then strips everything outside letters, digits,
/// whitespace, `.`, `-` and `,`. The strip runs second, so it can leave
/// doubled spaces behind.
pub fn clean_text(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let filtered = DISALLOWED.replace_all(&collapsed, "");
    filtered.trim().to_string()
}
