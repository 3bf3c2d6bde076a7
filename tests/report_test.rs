//! Integration tests for on-demand report aggregation.

mod common;

use common::{create_test_form, create_test_question, create_test_student, setup_test_db};
use facfeed::models::faculty::{self, NewFaculty};
use facfeed::models::report;
use facfeed::models::response::{self, RatingInput, SubmissionRequest};

async fn submit(
    pool: &sqlx::SqlitePool,
    form_id: i64,
    student_id: i64,
    ratings: Vec<(i64, f64)>,
    comment: Option<&str>,
) {
    response::submit(
        pool,
        form_id,
        student_id,
        &SubmissionRequest {
            comment: comment.map(str::to_string),
            ratings: ratings
                .into_iter()
                .map(|(question_id, rating)| RatingInput { question_id, rating })
                .collect(),
        },
    )
    .await
    .expect("submit");
}

#[tokio::test]
async fn test_form_report_means() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let form_id = create_test_form(pool, "DBMS", "prof_a@test.edu").await;
    let q_scale = create_test_question(pool, "Approachable?", "theory", "scale_3").await;
    let q_yes = create_test_question(pool, "On time?", "theory", "yes_no").await;

    let s1 = create_test_student(pool, "r1", "B1").await;
    let s2 = create_test_student(pool, "r2", "B2").await;

    submit(pool, form_id, s1, vec![(q_scale, 3.0), (q_yes, 1.0)], Some("good")).await;
    submit(pool, form_id, s2, vec![(q_scale, 2.0), (q_yes, 0.0)], None).await;

    let report = report::form_report(pool, form_id)
        .await
        .expect("query")
        .expect("form exists");

    assert_eq!(report.response_count, 2);
    assert_eq!(report.comments, vec!["good".to_string()]);
    assert_eq!(report.questions.len(), 2);

    let scale = report
        .questions
        .iter()
        .find(|q| q.question_id == q_scale)
        .expect("scale question present");
    // Raw mean in the native 1-3 scale; normalized on the 0-10 axis.
    assert!((scale.raw_mean - 2.5).abs() < 1e-9);
    let expected_norm = ((3.0 / 3.0 * 10.0) + (2.0 / 3.0 * 10.0)) / 2.0;
    assert!((scale.normalized_mean - expected_norm).abs() < 1e-9);

    let yes = report
        .questions
        .iter()
        .find(|q| q.question_id == q_yes)
        .expect("yes_no question present");
    assert!((yes.raw_mean - 0.5).abs() < 1e-9);
    assert!((yes.normalized_mean - 5.0).abs() < 1e-9);

    // Overall: responses averaged first, then meaned.
    // s1: (10 + 10) / 2 = 10; s2: (6.666... + 0) / 2 = 3.333...
    let expected_overall = (10.0 + (2.0 / 3.0 * 10.0) / 2.0) / 2.0;
    assert!((report.overall_average - expected_overall).abs() < 1e-9);
}

#[tokio::test]
async fn test_form_report_empty_form() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let form_id = create_test_form(pool, "DBMS", "prof_a@test.edu").await;
    let report = report::form_report(pool, form_id)
        .await
        .expect("query")
        .expect("form exists");

    assert_eq!(report.response_count, 0);
    assert_eq!(report.overall_average, 0.0);
    assert!(report.questions.is_empty());

    let missing = report::form_report(pool, 999_999).await.expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_faculty_standings_ranking_and_zero_response_bottom() {
    let db = setup_test_db().await;
    let pool = db.pool();

    faculty::create(pool, &NewFaculty {
        name: "Prof High".to_string(),
        email: "high@test.edu".to_string(),
        code: Some("PH".to_string()),
        department: "IT".to_string(),
    })
    .await
    .expect("create faculty");
    faculty::create(pool, &NewFaculty {
        name: "Prof Low".to_string(),
        email: "low@test.edu".to_string(),
        code: Some("PL".to_string()),
        department: "IT".to_string(),
    })
    .await
    .expect("create faculty");
    faculty::create(pool, &NewFaculty {
        name: "Prof Silent".to_string(),
        email: "silent@test.edu".to_string(),
        code: Some("PS".to_string()),
        department: "IT".to_string(),
    })
    .await
    .expect("create faculty");

    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;

    // Forms store the email with different casing — matching must be
    // case-insensitive.
    let form_high = create_test_form(pool, "DBMS", "HIGH@test.edu").await;
    let form_low = create_test_form(pool, "CN", "low@test.edu").await;

    let s1 = create_test_student(pool, "f1", "B1").await;
    let s2 = create_test_student(pool, "f2", "B1").await;

    submit(pool, form_high, s1, vec![(q, 9.0)], None).await;
    submit(pool, form_high, s2, vec![(q, 10.0)], None).await;
    submit(pool, form_low, s1, vec![(q, 4.0)], None).await;

    let standings = report::faculty_standings(pool).await.expect("standings");
    assert_eq!(standings.len(), 3);

    assert_eq!(standings[0].faculty_email, "high@test.edu");
    assert!((standings[0].average - 9.5).abs() < 1e-9);
    assert_eq!(standings[0].response_count, 2);

    assert_eq!(standings[1].faculty_email, "low@test.edu");
    assert!((standings[1].average - 4.0).abs() < 1e-9);

    // Zero responses: average 0, sorted to the bottom.
    assert_eq!(standings[2].faculty_email, "silent@test.edu");
    assert_eq!(standings[2].response_count, 0);
    assert_eq!(standings[2].average, 0.0);
}

#[tokio::test]
async fn test_faculty_standings_tie_break() {
    let db = setup_test_db().await;
    let pool = db.pool();

    // Two faculty with identical averages; more responses ranks first.
    faculty::create(pool, &NewFaculty {
        name: "Prof Busy".to_string(),
        email: "busy@test.edu".to_string(),
        code: None,
        department: "IT".to_string(),
    })
    .await
    .expect("create faculty");
    faculty::create(pool, &NewFaculty {
        name: "Prof Quiet".to_string(),
        email: "quiet@test.edu".to_string(),
        code: None,
        department: "IT".to_string(),
    })
    .await
    .expect("create faculty");

    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;
    let form_busy = create_test_form(pool, "DBMS", "busy@test.edu").await;
    let form_quiet = create_test_form(pool, "CN", "quiet@test.edu").await;

    let s1 = create_test_student(pool, "t1", "B1").await;
    let s2 = create_test_student(pool, "t2", "B1").await;

    submit(pool, form_busy, s1, vec![(q, 8.0)], None).await;
    submit(pool, form_busy, s2, vec![(q, 8.0)], None).await;
    submit(pool, form_quiet, s1, vec![(q, 8.0)], None).await;

    let standings = report::faculty_standings(pool).await.expect("standings");
    assert_eq!(standings[0].faculty_email, "busy@test.edu");
    assert_eq!(standings[1].faculty_email, "quiet@test.edu");

    // Equal average and count falls back to name order.
    let equal: Vec<&str> = standings
        .iter()
        .filter(|s| s.response_count == 0)
        .map(|s| s.faculty_name.as_str())
        .collect();
    assert!(equal.is_sorted());
}
