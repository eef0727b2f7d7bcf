//! Gazetteer directory loading.
//!
//! A gazetteer directory holds one `*.txt` file per category: the file stem
//! is the label, and every non-empty line is one key inserted under that
//! label. `loc.txt` containing `Atlantic City` yields the pair
//! `("Atlantic City", "loc")`.
//!
//! The loader only produces plain `(key, label)` pairs; feed them to
//! [`build`](crate::build) to get a matching index. Lines are trimmed
//! (dictionary keys are literal text, no glob or regex semantics), blank
//! lines are skipped, and files are visited in sorted path order so that
//! label accumulation across files is deterministic.

use crate::api::MatchError;
use std::fs;
use std::path::Path;

/// Read every `*.txt` file under `dir` into `(key, label)` pairs.
///
/// Non-`.txt` entries are ignored. I/O failures surface as
/// [`MatchError::Gazetteer`]; an empty directory yields an empty list.
pub fn read_gazetteers(dir: impl AsRef<Path>) -> Result<Vec<(String, String)>, MatchError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();

    let mut pairs = Vec::new();
    for path in files {
        // A .txt file without a UTF-8 stem has no usable label.
        let Some(label) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let contents = fs::read_to_string(&path)?;
        for line in contents.lines() {
            let key = line.trim();
            if key.is_empty() {
                continue;
            }
            pairs.push((key.to_string(), label.to_string()));
        }
    }

    if std::env::var_os("GAZEX_DEBUG").is_some() {
        eprintln!("[gazetteer] loaded {} pairs", pairs.len());
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gazex-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn file_stems_become_labels_and_lines_are_trimmed() {
        let dir = scratch_dir("stems");
        fs::write(dir.join("loc.txt"), "Atlantic City\n  Georgia  \n\n").unwrap();
        fs::write(dir.join("org.txt"), "Georgia\n").unwrap();
        fs::write(dir.join("notes.md"), "not a gazetteer\n").unwrap();

        let pairs = read_gazetteers(&dir).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("Atlantic City".to_string(), "loc".to_string()),
                ("Georgia".to_string(), "loc".to_string()),
                ("Georgia".to_string(), "org".to_string()),
            ]
        );
    }

    #[test]
    fn loaded_pairs_accumulate_labels_in_the_index() {
        let dir = scratch_dir("accumulate");
        fs::write(dir.join("loc.txt"), "Georgia\n").unwrap();
        fs::write(dir.join("org.txt"), "Georgia\n").unwrap();

        let index = crate::build(read_gazetteers(&dir).unwrap()).unwrap();
        let spans = crate::match_tokens(&index, &["Georgia"]).unwrap();

        assert_eq!(spans.len(), 1);
        let labels: Vec<&str> = spans[0].labels.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["loc", "org"]);
    }

    #[test]
    fn empty_directory_yields_no_pairs() {
        let dir = scratch_dir("empty");
        assert!(read_gazetteers(&dir).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = scratch_dir("missing").join("nope");
        assert!(matches!(read_gazetteers(&dir), Err(MatchError::Gazetteer(_))));
    }
}
