use std::collections::BTreeMap;

use super::types::{FacultyStanding, FormReport, QuestionStat};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::form::FormFilter;
use crate::models::response::ResponseWithItems;
use crate::models::{faculty, form, response};
use crate::rating::{self, QuestionKind};

/// Mean of per-response averages for a set of responses.
fn overall_average(responses: &[ResponseWithItems]) -> f64 {
    let averages: Vec<f64> = responses.iter().map(per_response_average).collect();
    rating::raw_mean(&averages)
}

fn per_response_average(r: &ResponseWithItems) -> f64 {
    let items: Vec<(f64, QuestionKind)> = r
        .items
        .iter()
        .map(|i| (i.rating, QuestionKind::parse(&i.question_type)))
        .collect();
    rating::response_average(&items)
}

/// Per-question statistics over a form's responses, keyed and ordered by
/// the snapshotted question id. Each item normalizes with its own type
/// snapshot, so rows submitted before a catalog edit keep their old scale.
fn question_stats(responses: &[ResponseWithItems]) -> Vec<QuestionStat> {
    struct Acc {
        text: String,
        qtype: String,
        raws: Vec<f64>,
        normalized: Vec<f64>,
    }

    let mut by_question: BTreeMap<i64, Acc> = BTreeMap::new();

    for r in responses {
        for item in &r.items {
            let kind = QuestionKind::parse(&item.question_type);
            let acc = by_question.entry(item.question_id).or_insert_with(|| Acc {
                text: item.question_text.clone(),
                qtype: item.question_type.clone(),
                raws: Vec::new(),
                normalized: Vec::new(),
            });
            acc.raws.push(item.rating);
            acc.normalized.push(rating::normalize(item.rating, kind));
        }
    }

    by_question
        .into_iter()
        .map(|(question_id, acc)| QuestionStat {
            question_id,
            question_text: acc.text,
            question_type: acc.qtype,
            response_count: acc.raws.len(),
            raw_mean: rating::raw_mean(&acc.raws),
            normalized_mean: rating::raw_mean(&acc.normalized),
        })
        .collect()
}

/// Build the on-demand report for one form. Returns None for an unknown
/// form id.
pub async fn form_report(pool: &DbPool, form_id: i64) -> Result<Option<FormReport>, AppError> {
    let Some(form) = form::find_by_id(pool, form_id).await? else {
        return Ok(None);
    };

    let responses = response::find_by_form(pool, form_id).await?;
    let comments = responses
        .iter()
        .filter_map(|r| r.response.comment.clone())
        .filter(|c| !c.trim().is_empty())
        .collect();

    Ok(Some(FormReport {
        response_count: responses.len(),
        overall_average: overall_average(&responses),
        questions: question_stats(&responses),
        comments,
        form,
    }))
}

/// Faculty ranking: every faculty record, with the mean of per-response
/// averages across all responses to all forms owned by that faculty
/// (matched case-insensitively by email). Ordering is descending by
/// average, then descending by response count, then name — faculty with no
/// responses end up at the bottom.
pub async fn faculty_standings(pool: &DbPool) -> Result<Vec<FacultyStanding>, AppError> {
    let members = faculty::find_all(pool).await?;
    let mut standings = Vec::with_capacity(members.len());

    for member in &members {
        let filter = FormFilter {
            faculty_email: Some(member.email.clone()),
            ..FormFilter::default()
        };
        let forms = form::find_all(pool, &filter).await?;

        let mut averages = Vec::new();
        for f in &forms {
            let responses = response::find_by_form(pool, f.id).await?;
            averages.extend(responses.iter().map(per_response_average));
        }

        standings.push(FacultyStanding {
            faculty_name: member.name.clone(),
            faculty_email: member.email.clone(),
            form_count: forms.len(),
            response_count: averages.len(),
            average: rating::raw_mean(&averages),
        });
    }

    standings.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| b.response_count.cmp(&a.response_count))
            .then_with(|| a.faculty_name.cmp(&b.faculty_name))
    });

    Ok(standings)
}
