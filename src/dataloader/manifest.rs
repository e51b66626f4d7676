use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::error::DataLoaderError;

/// One manifest line: an image path and its `dim_label` numeric labels.
#[derive(Clone, Debug, PartialEq)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub labels: Vec<f32>,
}

impl ManifestEntry {
    /// Reconstruct the manifest line this entry was parsed from.
    pub fn to_line(&self) -> String {
        let mut line = self.path.to_string_lossy().into_owned();
        for label in &self.labels {
            line.push(' ');
            line.push_str(&label.to_string());
        }
        line
    }
}

/// Ordered list of manifest entries, parsed once at loader setup and
/// immutable afterwards.
#[derive(Debug)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn from_file(path: &Path, dim_label: usize) -> Result<Self, DataLoaderError> {
        Self::parse(BufReader::new(File::open(path)?), dim_label)
    }

    /// Parse a line-oriented manifest. Each non-empty line must hold at
    /// least `dim_label + 1` whitespace-separated tokens: the final
    /// `dim_label` tokens are the labels, everything before them (rejoined
    /// with single spaces) is the image path. This is what lets paths
    /// contain embedded spaces.
    pub fn parse(reader: impl BufRead, dim_label: usize) -> Result<Self, DataLoaderError> {
        let mut entries = Vec::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            if tokens.len() < dim_label + 1 {
                return Err(DataLoaderError::ParseError {
                    line: line_idx + 1,
                    reason: format!(
                        "expected a path and {} labels, found {} tokens",
                        dim_label,
                        tokens.len()
                    ),
                });
            }

            let label_start = tokens.len() - dim_label;
            let mut labels = Vec::with_capacity(dim_label);
            for token in &tokens[label_start..] {
                let value: f32 = token.parse().map_err(|_| DataLoaderError::ParseError {
                    line: line_idx + 1,
                    reason: format!("label {:?} is not numeric", token),
                })?;
                labels.push(value);
            }

            entries.push(ManifestEntry {
                path: PathBuf::from(tokens[..label_start].join(" ")),
                labels,
            });
        }

        Ok(Manifest { entries })
    }

    /// Prepend `root` to every entry path.
    pub fn with_root_folder(mut self, root: &Path) -> Self {
        for entry in &mut self.entries {
            entry.path = root.join(&entry.path);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> &ManifestEntry {
        &self.entries[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(text: &str, dim_label: usize) -> Result<Manifest, DataLoaderError> {
        Manifest::parse(Cursor::new(text), dim_label)
    }

    #[test]
    fn parses_single_label_lines() {
        let manifest = parse_str("images/cat.jpg 3\nimages/dog.jpg 7\n", 1).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get(0).path, PathBuf::from("images/cat.jpg"));
        assert_eq!(manifest.get(0).labels, vec![3.0]);
        assert_eq!(manifest.get(1).labels, vec![7.0]);
    }

    #[test]
    fn parses_multi_label_lines() {
        let manifest = parse_str("a.png 0 1 2 3\nb.png 1 2 3 4\n", 4).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get(0).labels, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(manifest.get(1).labels, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn only_trailing_tokens_are_labels() {
        let manifest = parse_str("images/cat gray.jpg 0 1\n", 2).unwrap();
        assert_eq!(manifest.get(0).path, PathBuf::from("images/cat gray.jpg"));
        assert_eq!(manifest.get(0).labels, vec![0.0, 1.0]);
    }

    #[test]
    fn fractional_labels_accepted() {
        let manifest = parse_str("a.png 0.5 -1.25\n", 2).unwrap();
        assert_eq!(manifest.get(0).labels, vec![0.5, -1.25]);
    }

    #[test]
    fn short_line_is_parse_error() {
        let err = parse_str("a.png 0\nb.png\n", 1).unwrap_err();
        match err {
            DataLoaderError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_label_is_parse_error() {
        let err = parse_str("a.png zero\n", 1).unwrap_err();
        assert!(matches!(err, DataLoaderError::ParseError { line: 1, .. }));
    }

    #[test]
    fn blank_lines_skipped_and_empty_manifest_legal() {
        let manifest = parse_str("\n  \n", 1).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.iter().count(), 0);
    }

    #[test]
    fn entries_round_trip_through_to_line() {
        let manifest = parse_str("images/cat gray.jpg 0 1.5 -2 3\n", 4).unwrap();
        let line = manifest.get(0).to_line();
        let reparsed = parse_str(&line, 4).unwrap();
        assert_eq!(reparsed.get(0), manifest.get(0));
    }

    #[test]
    fn root_folder_prepended() {
        let manifest = parse_str("cat.jpg 0\n", 1)
            .unwrap()
            .with_root_folder(Path::new("/data/train"));
        assert_eq!(manifest.get(0).path, PathBuf::from("/data/train/cat.jpg"));
    }
}
