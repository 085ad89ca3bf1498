//! Flat-namespace storage for notes.
//!
//! Every note is one UTF-8 file directly inside the store's root directory.
//! There are no folders, no metadata and no versioning: the file holds the
//! note text verbatim.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Extension every stored note carries.
pub const NOTE_EXTENSION: &str = "md";

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid note name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("note {name:?} not found")]
    NotFound { name: String },
    #[error("note {name:?} is not valid UTF-8")]
    Encoding { name: String },
    #[error("I/O error on {name:?}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(name: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                name: name.to_string(),
            }
        } else {
            Self::Io {
                name: name.to_string(),
                source,
            }
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Validate a caller-supplied note name and give it the note extension.
///
/// Names are trimmed. Path separators, NUL, `.`/`..` and leading dots are
/// rejected so every name stays a single visible file inside the root.
/// A name that doesn't already end in `.md` gets it appended.
///
/// # Errors
///
/// Returns [`StoreError::InvalidName`] when the name can't be stored.
pub fn normalize_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    let invalid = |reason| StoreError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if trimmed.is_empty() {
        return Err(invalid("name is empty"));
    }
    if trimmed.contains(['/', '\\', '\0']) {
        return Err(invalid("name contains a path separator or NUL"));
    }
    if trimmed.starts_with('.') {
        return Err(invalid("name starts with a dot"));
    }
    let suffix = format!(".{NOTE_EXTENSION}");
    if trimmed.ends_with(&suffix) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{suffix}"))
    }
}

/// A directory of notes addressed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `text` under `name`, replacing any existing note.
    ///
    /// The text goes to a temporary file in the root that is then renamed
    /// over the target. Returns the normalized name the note was stored as.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidName`] for unusable names and
    /// [`StoreError::Io`] when the directory or file can't be written.
    pub fn save(&self, name: &str, text: &str) -> Result<String, StoreError> {
        let name = normalize_name(name)?;
        fs::create_dir_all(&self.root).map_err(|err| StoreError::io(&name, err))?;

        let mut tmp = NamedTempFile::new_in(&self.root).map_err(|err| StoreError::io(&name, err))?;
        tmp.write_all(text.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|err| StoreError::io(&name, err))?;
        tmp.persist(self.root.join(&name))
            .map_err(|err| StoreError::io(&name, err.error))?;

        tracing::debug!(name = %name, bytes = text.len(), "note saved");
        Ok(name)
    }

    /// Read the text stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such note exists,
    /// [`StoreError::Encoding`] if it isn't UTF-8 and [`StoreError::Io`]
    /// for other read failures.
    pub fn load(&self, name: &str) -> Result<String, StoreError> {
        let name = normalize_name(name)?;
        let bytes = fs::read(self.root.join(&name)).map_err(|err| StoreError::io(&name, err))?;
        let text = String::from_utf8(bytes).map_err(|_| StoreError::Encoding { name: name.clone() })?;
        tracing::debug!(name = %name, bytes = text.len(), "note loaded");
        Ok(text)
    }

    /// Names of all stored notes, in directory order.
    ///
    /// Hidden files are skipped.
    /// A root directory that doesn't exist yet lists as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory can't be read.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let root_name = self.root.display().to_string();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Io {
                    name: root_name,
                    source: err,
                });
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::Io {
                name: root_name.clone(),
                source: err,
            })?;
            let path = entry.path();
            let is_file = entry.file_type().is_ok_and(|ft| ft.is_file());
            let is_note = path.extension().is_some_and(|ext| ext == NOTE_EXTENSION);
            if is_file
                && is_note
                && let Some(name) = path.file_name().and_then(|n| n.to_str())
                && !name.starts_with('.')
            {
                names.push(name.to_string());
            }
        }
        tracing::debug!(count = names.len(), root = %root_name, "notes listed");
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_keeps_md_names() {
        assert_eq!(normalize_name("notes.md").unwrap(), "notes.md");
    }

    #[test]
    fn test_normalize_appends_extension() {
        assert_eq!(normalize_name("todo").unwrap(), "todo.md");
        assert_eq!(normalize_name("draft.txt").unwrap(), "draft.txt.md");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_name("  plan.md \n").unwrap(), "plan.md");
    }

    #[test]
    fn test_normalize_rejects_bad_names() {
        for name in ["", "   ", "../etc/passwd", "a/b.md", r"a\b.md", ".", "..", ".hidden", "a\0b"] {
            assert!(
                matches!(normalize_name(name), Err(StoreError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let text = "# Title\n\nSome *text* with ünïcode\n";
        assert_eq!(store.save("n.md", text).unwrap(), "n.md");
        assert_eq!(store.load("n.md").unwrap(), text);
    }

    #[test]
    fn test_save_writes_text_verbatim() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.save("raw.md", "a\r\nb").unwrap();
        assert_eq!(std::fs::read(dir.path().join("raw.md")).unwrap(), b"a\r\nb");
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.save("n.md", "first").unwrap();
        store.save("n.md", "second").unwrap();
        assert_eq!(store.load("n.md").unwrap(), "second");
        assert_eq!(store.list().unwrap(), vec!["n.md".to_string()]);
    }

    #[test]
    fn test_save_creates_missing_root() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("nested").join("notes"));
        store.save("a.md", "x").unwrap();
        assert_eq!(store.load("a.md").unwrap(), "x");
    }

    #[test]
    fn test_save_without_extension_is_listed() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        assert_eq!(store.save("ideas", "x").unwrap(), "ideas.md");
        assert_eq!(store.list().unwrap(), vec!["ideas.md".to_string()]);
        assert_eq!(store.load("ideas").unwrap(), "x");
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let err = store.load("missing.md").unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[test]
    fn test_load_non_utf8_is_encoding_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bin.md"), [0xff, 0xfe, 0x00]).unwrap();
        let store = DocumentStore::new(dir.path());
        assert!(matches!(
            store.load("bin.md"),
            Err(StoreError::Encoding { .. })
        ));
    }

    #[test]
    fn test_list_filters_to_md_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("keep.md"), "").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "").unwrap();
        std::fs::write(dir.path().join("upper.MD"), "").unwrap();
        std::fs::write(dir.path().join(".hidden.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("folder.md")).unwrap();
        let store = DocumentStore::new(dir.path());
        assert_eq!(store.list().unwrap(), vec!["keep.md".to_string()]);
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.save("a.md", "x").unwrap();
        let count = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 1);
    }
}
