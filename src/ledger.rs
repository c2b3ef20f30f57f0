use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

// Policy id as it appears in persisted detail URLs.
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"plcyBizId=([^&\s]+)").unwrap());

/// Recover the set of already-processed policy ids from prior output
/// files. The first `plcyBizId=` match per line contributes its value.
/// Missing files are treated as empty; other I/O errors propagate.
pub fn load_saved_policy_ids<P: AsRef<Path>>(paths: &[P]) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();
    for path in paths {
        let file = match File::open(path.as_ref()) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };
        for line in BufReader::new(file).lines() {
            let line = line?;
            if let Some(caps) = ID_RE.captures(&line) {
                ids.insert(caps[1].trim().to_string());
            }
        }
    }
    Ok(ids)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_ids_from_prior_output() {
        let ids = load_saved_policy_ids(&["tests/fixtures/saved_output.txt"]).unwrap();
        assert!(ids.contains("ABC123"));
        assert!(ids.contains("PLCY2024099"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn missing_file_is_empty_not_an_error() {
        let ids = load_saved_policy_ids(&["tests/fixtures/does_not_exist.txt"]).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn union_across_files_dedups() {
        let ids = load_saved_policy_ids(&[
            "tests/fixtures/saved_output.txt",
            "tests/fixtures/saved_output.txt",
        ])
        .unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn only_first_match_per_line_counts() {
        let ids = load_saved_policy_ids(&["tests/fixtures/saved_output.txt"]).unwrap();
        // The fixture's last line carries two ids; only the first is kept.
        assert!(!ids.contains("SECOND999"));
    }
}
