//! CSV import/export for timetable entries.
//!
//! The format is deliberately rigid: comma-split, one fixed header line,
//! no quoting. It matches what the published-spreadsheet export produces.

use super::types::{NewTimetableEntry, TimetableEntry};
use crate::models::bulk::{BulkError, BulkResult};

pub const CSV_HEADER: &str = "kind,subject,faculty_code,room,batch,division,semester,course,day,slot";

/// Parse CSV text into entry rows. Row-level problems land in the returned
/// errors; a bad row never aborts the rest of the file.
pub fn parse_csv(text: &str) -> Result<(Vec<NewTimetableEntry>, Vec<BulkError>), String> {
    let mut lines = text.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line.trim(),
            None => return Err("empty CSV input".to_string()),
        }
    };
    if header != CSV_HEADER {
        return Err(format!("unexpected CSV header — expected '{CSV_HEADER}'"));
    }

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (idx, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 10 {
            errors.push(row_error(line_no, line, "expected 10 comma-separated fields"));
            continue;
        }

        let kind = fields[0].to_lowercase();
        if kind != "theory" && kind != "lab" {
            errors.push(row_error(line_no, line, "kind must be 'theory' or 'lab'"));
            continue;
        }
        if fields[1].is_empty() {
            errors.push(row_error(line_no, line, "subject is required"));
            continue;
        }
        if fields[2].is_empty() {
            errors.push(row_error(line_no, line, "faculty_code is required"));
            continue;
        }
        if fields[5].is_empty() {
            errors.push(row_error(line_no, line, "division is required"));
            continue;
        }
        let semester: i64 = match fields[6].parse() {
            Ok(s) => s,
            Err(_) => {
                errors.push(row_error(line_no, line, "semester must be a number"));
                continue;
            }
        };
        if fields[7].is_empty() {
            errors.push(row_error(line_no, line, "course is required"));
            continue;
        }

        rows.push(NewTimetableEntry {
            kind,
            subject: fields[1].to_string(),
            faculty_code: fields[2].to_uppercase(),
            room: opt(fields[3]),
            batch: opt(fields[4]),
            division: fields[5].to_string(),
            semester,
            course: fields[7].to_string(),
            day: opt(fields[8]),
            slot: opt(fields[9]),
        });
    }

    Ok((rows, errors))
}

/// Render entries back to the same CSV format, header included.
pub fn to_csv(entries: &[TimetableEntry]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for e in entries {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            e.kind,
            e.subject,
            e.faculty_code,
            e.room.as_deref().unwrap_or(""),
            e.batch.as_deref().unwrap_or(""),
            e.division,
            e.semester,
            e.course,
            e.day.as_deref().unwrap_or(""),
            e.slot.as_deref().unwrap_or(""),
        ));
    }
    out
}

/// Fold CSV row errors into a bulk summary.
pub fn merge_row_errors(result: &mut BulkResult, errors: Vec<BulkError>) {
    result.errors.extend(errors);
}

fn opt(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

fn row_error(line_no: usize, line: &str, reason: &str) -> BulkError {
    BulkError {
        item: serde_json::json!({ "line": line_no, "content": line }),
        reason: reason.to_string(),
    }
}
