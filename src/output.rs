use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::answer::generate_answer;
use crate::parser::detail::Section;
use crate::sanitize::remove_special_chars_with_space;

/// Append a policy's title and detail URL to the crawl log, followed by a
/// blank line.
pub fn append_policy_entry<P: AsRef<Path>>(path: P, title: &str, url: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}\n{}\n", title, url)?;
    Ok(())
}

/// Append one delimited answer block for a policy: an opening `"""` line
/// carrying the title, one sanitized answer line per question, and a
/// closing `"""` line.
pub fn append_policy_answers<P: AsRef<Path>>(
    path: P,
    title: &str,
    questions: &[&str],
    sections: &[Section],
) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "\"\"\"{}", title)?;
    for question in questions {
        let answer = remove_special_chars_with_space(&generate_answer(question, sections));
        writeln!(file, "{}", answer)?;
    }
    writeln!(file, "\"\"\"")?;
    Ok(())
}

// ── Tests ──
