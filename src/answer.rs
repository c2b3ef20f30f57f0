use crate::parser::detail::Section;

/// Fixed reply when no section overlaps the question.
pub const NO_MATCH_MESSAGE: &str = "관련된 정보를 찾을 수 없습니다.";

/// Pick the section whose title words overlap the question the most.
///
/// Scoring is deliberately naive: a section scores one point per
/// whitespace-split word of its title that occurs, case-insensitively, as
/// a substring of the question. Only a strictly greater score replaces the
/// current best, so ties keep the earlier section. A zero score everywhere
/// is no match.
pub fn find_best_section<'a>(question: &str, sections: &'a [Section]) -> Option<&'a Section> {
    let question_lower = question.to_lowercase();
    let mut best: Option<&Section> = None;
    let mut max_matches = 0;
    for section in sections {
        let matches = section
            .title
            .to_lowercase()
            .split_whitespace()
            .filter(|word| question_lower.contains(*word))
            .count();
        if matches > max_matches {
            max_matches = matches;
            best = Some(section);
        }
    }
    best
}

/// Render the best-matching section as a flat text block, or the fixed
/// no-match message.
pub fn generate_answer(question: &str, sections: &[Section]) -> String {
    let Some(section) = find_best_section(question, sections) else {
        return NO_MATCH_MESSAGE.to_string();
    };
    let mut answer = format!("{}\n", section.title);
    for (label, value) in &section.fields {
        answer.push_str(label);
        answer.push_str(": ");
        answer.push_str(value);
        answer.push('\n');
    }
    answer
}

// ── Tests ──
