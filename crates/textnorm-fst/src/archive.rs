// Named-entry archive of serialized automata.
//
// Layout: header (kind = archive), entry count (u32), then per entry the
// name length (u32), the UTF-8 name, the blob length (u64) and the blob
// (a complete serialized automaton, header included).

use std::fs;
use std::path::{Path, PathBuf};

use crate::format::{self, HEADER_SIZE, Kind, read_u32};
use crate::fst::VectorFst;
use crate::FstError;

/// An archive loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: Vec<(String, VectorFst)>,
}

impl Archive {
    /// Read and parse the archive at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FstError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| FstError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Parse an archive from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FstError> {
        format::expect_kind(data, Kind::Archive)?;
        let mut cursor = Cursor {
            data,
            pos: HEADER_SIZE,
        };
        let count = cursor.u32()?;
        let mut entries: Vec<(String, VectorFst)> = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let name_len = cursor.u32()? as usize;
            let name_bytes = cursor.take(name_len)?;
            let name = String::from_utf8(name_bytes.to_vec()).map_err(|_| {
                FstError::InvalidEntryName(String::from_utf8_lossy(name_bytes).into_owned())
            })?;
            let blob_len = cursor.u64()? as usize;
            let blob = cursor.take(blob_len)?;
            if entries.iter().any(|(n, _)| *n == name) {
                return Err(FstError::DuplicateEntry(name));
            }
            entries.push((name, VectorFst::from_bytes(blob)?));
        }
        Ok(Self { entries })
    }

    /// Serialize the archive.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        format::write_header(&mut out, Kind::Archive);
        out.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for (name, fst) in &self.entries {
            let blob = fst.to_bytes();
            out.extend_from_slice(&(name.len() as u32).to_le_bytes());
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(&(blob.len() as u64).to_le_bytes());
            out.extend_from_slice(&blob);
        }
        out
    }

    /// The automaton stored under `name`.
    pub fn get(&self, name: &str) -> Option<&VectorFst> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, fst)| fst)
    }

    /// Entry names in storage order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: &str, fst: &VectorFst) -> Result<(), FstError> {
        if name.is_empty() || name.contains('\0') {
            return Err(FstError::InvalidEntryName(name.to_string()));
        }
        if self.get(name).is_some() {
            return Err(FstError::DuplicateEntry(name.to_string()));
        }
        self.entries.push((name.to_string(), fst.clone()));
        Ok(())
    }
}

/// Collects entries and writes them to `path` on [`ArchiveWriter::close`].
///
/// The file is first written to a hidden sibling and then renamed into
/// place, so readers never observe a partial archive and an existing
/// archive is replaced whole.
#[derive(Debug)]
pub struct ArchiveWriter {
    path: PathBuf,
    archive: Archive,
}

impl ArchiveWriter {
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            archive: Archive::default(),
        }
    }

    /// Add `fst` under `name`. Names must be non-empty and unique.
    pub fn add(&mut self, name: &str, fst: &VectorFst) -> Result<(), FstError> {
        self.archive.insert(name, fst)
    }

    /// Write the archive and return its path.
    pub fn close(self) -> Result<PathBuf, FstError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| FstError::InvalidEntryName(self.path.display().to_string()))?;
        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(file_name);
        tmp_name.push(".partial");
        let tmp = self.path.with_file_name(tmp_name);

        fs::write(&tmp, self.archive.to_bytes()).map_err(|source| FstError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            if let Err(e) = fs::remove_file(&tmp) {
                log::warn!("could not remove {}: {e}", tmp.display());
            }
            return Err(FstError::Io {
                path: self.path,
                source,
            });
        }
        Ok(self.path)
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], FstError> {
        let end = self.pos.checked_add(len).unwrap_or(usize::MAX);
        if end > self.data.len() {
            return Err(FstError::TooShort {
                expected: end,
                actual: self.data.len(),
            });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32, FstError> {
        let bytes = self.take(4)?;
        Ok(read_u32(bytes, 0))
    }

    fn u64(&mut self) -> Result<u64, FstError> {
        let bytes = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::cross;

    #[test]
    fn write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grammar.far");
        let mut writer = ArchiveWriter::create(&path);
        writer.add("CLASSIFY", &cross("1", "one").optimize()).unwrap();
        let written = writer.close().unwrap();
        assert_eq!(written, path);

        let archive = Archive::open(&path).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.names().collect::<Vec<_>>(), ["CLASSIFY"]);
        let fst = archive.get("CLASSIFY").unwrap();
        assert_eq!(fst.transduce("1").as_deref(), Some("one"));
        assert!(archive.get("VERBALIZE").is_none());
    }

    #[test]
    fn rewrite_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.far");
        for output in ["first", "second"] {
            let mut writer = ArchiveWriter::create(&path);
            writer.add("ENTRY", &cross("x", output)).unwrap();
            writer.close().unwrap();
        }
        let archive = Archive::open(&path).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(
            archive.get("ENTRY").unwrap().transduce("x").as_deref(),
            Some("second")
        );
        // No temporary file is left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_rename_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.far");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inside"), b"").unwrap();

        let mut writer = ArchiveWriter::create(&path);
        writer.add("ENTRY", &cross("x", "y")).unwrap();
        match writer.close() {
            Err(FstError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result: {other:?}"),
        }
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["taken.far"]);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut writer = ArchiveWriter::create("unused.far");
        writer.add("A", &cross("a", "a")).unwrap();
        assert!(matches!(
            writer.add("A", &cross("b", "b")),
            Err(FstError::DuplicateEntry(name)) if name == "A"
        ));
        assert!(matches!(
            writer.add("", &cross("b", "b")),
            Err(FstError::InvalidEntryName(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Archive::open(dir.path().join("absent.far")).unwrap_err();
        assert!(matches!(err, FstError::Io { .. }));
    }

    #[test]
    fn truncated_archive_rejected() {
        let mut archive = Archive::default();
        archive.insert("A", &cross("a", "b")).unwrap();
        let bytes = archive.to_bytes();
        assert!(Archive::from_bytes(&bytes[..bytes.len() - 3]).is_err());
        assert!(matches!(
            VectorFst::from_bytes(&bytes),
            Err(FstError::KindMismatch { .. })
        ));
    }
}
