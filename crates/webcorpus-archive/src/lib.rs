//! Read-only access to a ZIP archive of HTML documents.
//!
//! The reader tolerates the path quirks real-world archives accumulate:
//! leading slashes, backslash separators, and a macOS resource-fork
//! directory (`__MACOSX/`) that should never be treated as content.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use webcorpus_types::{CoreError, CoreResult};

/// A handle onto an opened ZIP archive.
///
/// Generic over the underlying reader so tests can build an archive in
/// memory (`Cursor<Vec<u8>>`) without touching the filesystem, while
/// production callers open a real file via [`ArchiveReader::open`].
pub struct ArchiveReader<R> {
    archive: zip::ZipArchive<R>,
    path: PathBuf,
}

impl ArchiveReader<File> {
    /// Open a ZIP archive from a path on disk.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file =
            File::open(&path).map_err(|e| CoreError::archive_missing(path.clone(), e))?;
        Self::from_reader(file, path)
    }
}

impl ArchiveReader<Cursor<Vec<u8>>> {
    /// Open a ZIP archive held entirely in memory. Used by tests and by
    /// callers that already have archive bytes loaded.
    pub fn from_bytes(bytes: Vec<u8>, label: impl AsRef<Path>) -> CoreResult<Self> {
        Self::from_reader(Cursor::new(bytes), label.as_ref().to_path_buf())
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    fn from_reader(reader: R, path: PathBuf) -> CoreResult<Self> {
        let archive = zip::ZipArchive::new(reader)
            .map_err(|e| CoreError::archive_corrupt(path.clone(), e.to_string()))?;
        Ok(Self { archive, path })
    }

    /// List the canonical paths of every HTML entry in the archive, in
    /// archive order. Entries whose normalized path begins with
    /// `__MACOSX/` are excluded, as are entries not ending in `.html` or
    /// `.htm` (case-insensitive).
    pub fn list_html_entries(&self) -> Vec<String> {
        let mut out = Vec::new();
        for i in 0..self.archive.len() {
            let Some(name) = self.archive.name_for_index(i) else {
                continue;
            };
            let normalized = normalize_entry_path(name);
            if is_macosx(&normalized) {
                continue;
            }
            if is_html_name(&normalized) {
                out.push(normalized);
            }
        }
        out
    }

    /// Read an entry's raw bytes, looking it up first by exact name and
    /// falling back to a normalized-path comparison (leading slash and
    /// separator differences) if that fails.
    pub fn read(&mut self, entry_path: &str) -> CoreResult<Vec<u8>> {
        if let Ok(mut file) = self.archive.by_name(entry_path) {
            let mut buf = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut buf).ok();
            return Ok(buf);
        }

        let wanted = normalize_entry_path(entry_path);
        for i in 0..self.archive.len() {
            let Some(name) = self.archive.name_for_index(i) else {
                continue;
            };
            if normalize_entry_path(name) == wanted {
                let mut file = self
                    .archive
                    .by_index(i)
                    .map_err(|_| CoreError::entry_not_found(entry_path))?;
                let mut buf = Vec::with_capacity(file.size() as usize);
                file.read_to_end(&mut buf).ok();
                return Ok(buf);
            }
        }

        Err(CoreError::entry_not_found(entry_path))
    }

    /// Read an entry and decode it as UTF-8, replacing invalid sequences
    /// rather than failing.
    pub fn read_lossy(&mut self, entry_path: &str) -> CoreResult<String> {
        let bytes = self.read(entry_path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// The path or label this reader was opened with.
    pub fn source_path(&self) -> &Path {
        &self.path
    }
}

fn normalize_entry_path(name: &str) -> String {
    name.replace('\\', "/")
        .trim_start_matches('/')
        .to_string()
}

fn is_macosx(normalized: &str) -> bool {
    normalized.starts_with("__MACOSX/") || normalized == "__MACOSX"
}

fn is_html_name(normalized: &str) -> bool {
    let lower = normalized.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_fixture() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
            writer.start_file("index.html", opts).unwrap();
            writer.write_all(b"<p>hello</p>").unwrap();
            writer.start_file("/about.htm", opts).unwrap();
            writer.write_all(b"<p>about</p>").unwrap();
            writer.start_file("notes.txt", opts).unwrap();
            writer.write_all(b"not html").unwrap();
            writer.start_file("__MACOSX/index.html", opts).unwrap();
            writer.write_all(b"resource fork junk").unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn lists_only_html_entries_excluding_macosx() {
        let reader = ArchiveReader::from_bytes(build_fixture(), "fixture.zip").unwrap();
        let mut entries = reader.list_html_entries();
        entries.sort();
        assert_eq!(entries, vec!["about.htm".to_string(), "index.html".to_string()]);
    }

    #[test]
    fn reads_entry_with_leading_slash_tolerance() {
        let mut reader = ArchiveReader::from_bytes(build_fixture(), "fixture.zip").unwrap();
        let bytes = reader.read("about.htm").unwrap();
        assert_eq!(bytes, b"<p>about</p>");
    }

    #[test]
    fn missing_entry_errors() {
        let mut reader = ArchiveReader::from_bytes(build_fixture(), "fixture.zip").unwrap();
        let err = reader.read("missing.html").unwrap_err();
        assert!(matches!(err, CoreError::EntryNotFound { .. }));
    }

    #[test]
    fn corrupt_archive_errors() {
        let err = ArchiveReader::from_bytes(vec![1, 2, 3, 4], "junk.zip").unwrap_err();
        assert!(matches!(err, CoreError::ArchiveCorrupt { .. }));
    }
}
