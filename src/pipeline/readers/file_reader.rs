// src/pipeline/readers/file_reader.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::data_model::RawDocument;
use crate::error::Result;
use crate::pipeline::readers::BaseReader;

/// Reads resumes from files on disk.
///
/// Each input path is either a file or a directory. Directories are expanded
/// one level deep, hidden entries skipped, in file-name order so the batch
/// order does not depend on the file system.
#[derive(Debug, Clone)]
pub struct FileReader {
    paths: Vec<PathBuf>,
}

impl FileReader {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        FileReader { paths }
    }

    /// The concrete file list, in batch order.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && !is_hidden(p))
                    .collect();
                entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
                debug!(dir = %path.display(), files = entries.len(), "Expanded input directory");
                files.extend(entries);
            } else {
                files.push(path.clone());
            }
        }
        Ok(files)
    }

    pub fn read_all(&self) -> Result<Vec<RawDocument>> {
        self.read_documents()?.collect()
    }
}

impl BaseReader for FileReader {
    fn read_documents(&self) -> Result<Box<dyn Iterator<Item = Result<RawDocument>>>> {
        let files = self.files()?;
        Ok(Box::new(files.into_iter().map(|path| read_file(&path))))
    }
}

fn read_file(path: &Path) -> Result<RawDocument> {
    let bytes = fs::read(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(RawDocument::new(filename, bytes))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_expanded_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"second").unwrap();
        fs::write(dir.path().join("a.pdf"), b"first").unwrap();
        fs::write(dir.path().join(".hidden"), b"skip").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let docs = FileReader::new(vec![dir.path().to_path_buf()]).read_all().unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt"]);
        assert_eq!(docs[1].bytes, b"second");
    }

    #[test]
    fn test_explicit_files_keep_argument_order() {
        let dir = tempdir().unwrap();
        let z = dir.path().join("z.txt");
        let a = dir.path().join("a.txt");
        fs::write(&z, b"z").unwrap();
        fs::write(&a, b"a").unwrap();

        let docs = FileReader::new(vec![z, a]).read_all().unwrap();
        assert_eq!(docs[0].filename, "z.txt");
        assert_eq!(docs[1].filename, "a.txt");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = FileReader::new(vec![dir.path().join("missing.txt")]).read_all();
        assert!(matches!(result, Err(crate::error::PipelineError::IoError { .. })));
    }
}
