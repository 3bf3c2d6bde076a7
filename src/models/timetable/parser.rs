//! Heuristic timetable text extractor.
//!
//! Scans unstructured text (e.g. extracted from a timetable PDF) for two
//! fixed token patterns and proposes candidate entries. The parser never
//! commits anything; candidates are returned for manual review with a
//! validity flag per faculty code.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::types::ExtractedEntry;

/// Tokens that look like subjects but never are.
const STOPWORDS: &[&str] = &[
    "ROOM", "LAB", "LABS", "BREAK", "LUNCH", "RECESS", "SEM", "DIV", "BATCH", "DAY", "TIME",
    "MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN",
];

/// `BATCH SUBJECT ROOM CODE` — batch is one of {A,B,C,D} + {1,2,3}.
fn lab_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([A-D][1-3])\s+([A-Z]{2,6})\s+([A-Z]?\d{3}[A-Z]?)\s+([A-Z]{2,4})\b")
            .expect("lab pattern is valid")
    })
}

/// `SUBJECT ROOM CODE` — subject 2–6 letters, room optional letter + 3
/// digits + optional letter, faculty code 2–4 letters.
fn theory_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([A-Z]{2,6})\s+([A-Z]?\d{3}[A-Z]?)\s+([A-Z]{2,4})\b")
            .expect("theory pattern is valid")
    })
}

/// Strip a known faculty code accidentally concatenated onto the front of a
/// subject token (a common artifact of column-less PDF text extraction).
/// Longest codes are tried first so the result is deterministic.
fn strip_code_prefix(subject: &str, known_codes: &HashSet<String>) -> String {
    let mut codes: Vec<&String> = known_codes.iter().collect();
    codes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    for code in codes {
        if let Some(rest) = subject.strip_prefix(code.as_str()) {
            if rest.len() >= 2 {
                return rest.to_string();
            }
        }
    }
    subject.to_string()
}

/// Whether a cleaned subject token is plausible: not a stopword, not itself
/// a bare faculty code.
fn is_subject(token: &str, known_codes: &HashSet<String>) -> bool {
    !STOPWORDS.contains(&token) && !known_codes.contains(token)
}

/// Extract candidate timetable entries from unstructured text.
///
/// Lab rows are matched first and their spans blanked out so the shorter
/// theory pattern cannot re-match inside them. Candidates are deduplicated
/// by (kind, subject, faculty_code, batch) and marked valid iff the faculty
/// code is known.
pub fn extract_entries(text: &str, known_codes: &[String]) -> Vec<ExtractedEntry> {
    let codes: HashSet<String> = known_codes.iter().map(|c| c.to_uppercase()).collect();
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    let mut blanked = text.to_string();
    for caps in lab_pattern().captures_iter(text) {
        let (batch, raw_subject, room, code) = (
            caps[1].to_string(),
            caps[2].to_string(),
            caps[3].to_string(),
            caps[4].to_string(),
        );

        let whole = caps.get(0).expect("match 0 always present");
        blanked.replace_range(whole.range(), &" ".repeat(whole.as_str().len()));

        let subject = strip_code_prefix(&raw_subject, &codes);
        if !is_subject(&subject, &codes) {
            continue;
        }
        if !seen.insert(("lab", subject.clone(), code.clone(), Some(batch.clone()))) {
            continue;
        }

        entries.push(ExtractedEntry {
            kind: "lab".to_string(),
            subject,
            faculty_code: code.clone(),
            room: Some(room),
            batch: Some(batch),
            valid: codes.contains(&code),
        });
    }

    for caps in theory_pattern().captures_iter(&blanked) {
        let (raw_subject, room, code) = (
            caps[1].to_string(),
            caps[2].to_string(),
            caps[3].to_string(),
        );

        let subject = strip_code_prefix(&raw_subject, &codes);
        if !is_subject(&subject, &codes) {
            continue;
        }
        if !seen.insert(("theory", subject.clone(), code.clone(), None)) {
            continue;
        }

        entries.push(ExtractedEntry {
            kind: "theory".to_string(),
            subject,
            faculty_code: code.clone(),
            room: Some(room),
            batch: None,
            valid: codes.contains(&code),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_theory_row() {
        let found = extract_entries("DBMS A304 JDS", &codes(&["JDS"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "theory");
        assert_eq!(found[0].subject, "DBMS");
        assert_eq!(found[0].faculty_code, "JDS");
        assert_eq!(found[0].room.as_deref(), Some("A304"));
        assert_eq!(found[0].batch, None);
        assert!(found[0].valid);
    }

    #[test]
    fn matches_lab_row_with_batch() {
        let found = extract_entries("B2 DSA 415B PRM", &codes(&["PRM"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "lab");
        assert_eq!(found[0].subject, "DSA");
        assert_eq!(found[0].batch.as_deref(), Some("B2"));
        assert_eq!(found[0].room.as_deref(), Some("415B"));
    }

    #[test]
    fn lab_span_not_rematched_as_theory() {
        // The inner `DSA 415 PRM` must not also surface as a theory entry.
        let found = extract_entries("A1 DSA 415 PRM", &codes(&["PRM"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, "lab");
    }

    #[test]
    fn strips_concatenated_code_prefix() {
        // `JDDBMS` = faculty code "JD" glued onto the subject by text
        // extraction; still within the 6-letter subject token limit.
        let found = extract_entries("JDDBMS 304 ABC", &codes(&["JD", "ABC"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject, "DBMS");
        assert_eq!(found[0].faculty_code, "ABC");
    }

    #[test]
    fn rejects_stopword_subjects() {
        let found = extract_entries("LUNCH 101 JDS BREAK 202 JDS", &codes(&["JDS"]));
        assert!(found.is_empty());
    }

    #[test]
    fn rejects_bare_code_as_subject() {
        let found = extract_entries("PRM 304 JDS", &codes(&["JDS", "PRM"]));
        assert!(found.is_empty());
    }

    #[test]
    fn deduplicates_by_composite_key() {
        let text = "DBMS A304 JDS\nDBMS A305 JDS";
        let found = extract_entries(text, &codes(&["JDS"]));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn unknown_code_marked_invalid_but_returned() {
        let found = extract_entries("DBMS A304 XYZ", &codes(&["JDS"]));
        assert_eq!(found.len(), 1);
        assert!(!found[0].valid);
    }

    #[test]
    fn same_subject_different_batches_kept() {
        let text = "A1 DSA 415 PRM\nA2 DSA 415 PRM";
        let found = extract_entries(text, &codes(&["PRM"]));
        assert_eq!(found.len(), 2);
    }
}
