//! Integration tests for the submission gate.

mod common;

use common::{
    create_test_form, create_test_form_with_batch, create_test_question, create_test_student,
    setup_test_db,
};
use facfeed::models::question::{self, NewQuestion};
use facfeed::models::response::{self, RatingInput, SubmissionError, SubmissionRequest};

fn request(ratings: Vec<RatingInput>) -> SubmissionRequest {
    SubmissionRequest {
        comment: None,
        ratings,
    }
}

#[tokio::test]
async fn test_submit_happy_path() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "happy", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;
    let q1 = create_test_question(pool, "Subject knowledge?", "theory", "scale_1_10").await;
    let q2 = create_test_question(pool, "Syllabus on time?", "theory", "yes_no").await;

    let response_id = response::submit(
        pool,
        form_id,
        student_id,
        &SubmissionRequest {
            comment: Some("Great lectures".to_string()),
            ratings: vec![
                RatingInput { question_id: q1, rating: 8.0 },
                RatingInput { question_id: q2, rating: 1.0 },
            ],
        },
    )
    .await
    .expect("submit");

    let stored = response::find_by_id(pool, response_id)
        .await
        .expect("query")
        .expect("response exists");
    assert_eq!(stored.form_id, form_id);
    assert_eq!(stored.student_id, student_id);
    assert_eq!(stored.comment.as_deref(), Some("Great lectures"));

    let items = response::find_items(pool, response_id).await.expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].question_text, "Subject knowledge?");
    assert_eq!(items[0].question_type, "scale_1_10");
}

#[tokio::test]
async fn test_duplicate_submission_rejected() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "dup", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;
    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;

    response::submit(pool, form_id, student_id, &request(vec![RatingInput { question_id: q, rating: 5.0 }]))
        .await
        .expect("first submit");

    let second = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![RatingInput { question_id: q, rating: 7.0 }]),
    )
    .await;
    assert!(matches!(second, Err(SubmissionError::DuplicateSubmission)));

    // Nothing extra was written.
    let responses = response::find_by_form(pool, form_id).await.expect("list");
    assert_eq!(responses.len(), 1);
}

#[tokio::test]
async fn test_concurrent_submissions_exactly_one_wins() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "race", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;
    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;

    let p1 = pool.clone();
    let p2 = pool.clone();
    let r1 = request(vec![RatingInput { question_id: q, rating: 5.0 }]);
    let r2 = request(vec![RatingInput { question_id: q, rating: 9.0 }]);

    let (a, b) = tokio::join!(
        tokio::spawn(async move { response::submit(&p1, form_id, student_id, &r1).await }),
        tokio::spawn(async move { response::submit(&p2, form_id, student_id, &r2).await }),
    );
    let a = a.expect("task a");
    let b = b.expect("task b");

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent submission must win");

    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser, Err(SubmissionError::DuplicateSubmission)));

    let responses = response::find_by_form(pool, form_id).await.expect("list");
    assert_eq!(responses.len(), 1);
}

#[tokio::test]
async fn test_wrong_division_rejected() {
    let db = setup_test_db().await;
    let pool = db.pool();

    // Student in division A; form for division B, everything else matching.
    let student_id = create_test_student(pool, "division", "B1").await;
    let form_id = {
        use facfeed::models::form::{self, NewForm};
        form::create(
            pool,
            &NewForm {
                form_type: "theory".to_string(),
                subject_name: "DBMS".to_string(),
                subject_code: None,
                faculty_name: "Prof".to_string(),
                faculty_email: "prof@test.edu".to_string(),
                division: "B".to_string(),
                batch: None,
                semester: 3,
                course: "IT".to_string(),
            },
        )
        .await
        .expect("create form")
    };
    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;

    let result = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![RatingInput { question_id: q, rating: 5.0 }]),
    )
    .await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized)));
}

#[tokio::test]
async fn test_batch_unset_form_accepts_any_student_batch() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "anybatch", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await; // batch: None
    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;

    let result = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![RatingInput { question_id: q, rating: 5.0 }]),
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_batch_mismatch_rejected() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "batchmis", "B1").await;
    let form_id =
        create_test_form_with_batch(pool, "DSA Lab", "prof@test.edu", Some("B2")).await;
    let q = create_test_question(pool, "Q", "lab", "scale_3").await;

    let result = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![RatingInput { question_id: q, rating: 2.0 }]),
    )
    .await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized)));
}

#[tokio::test]
async fn test_closed_form_rejected() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "closed", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;
    facfeed::models::form::update_status(pool, form_id, "closed")
        .await
        .expect("close form");
    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;

    let result = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![RatingInput { question_id: q, rating: 5.0 }]),
    )
    .await;
    assert!(matches!(result, Err(SubmissionError::NotAuthorized)));
}

#[tokio::test]
async fn test_missing_student_and_form() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "missing", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;

    let no_student = response::submit(pool, form_id, 999_999, &request(vec![])).await;
    assert!(matches!(no_student, Err(SubmissionError::StudentNotFound)));

    let no_form = response::submit(pool, 999_999, student_id, &request(vec![])).await;
    assert!(matches!(no_form, Err(SubmissionError::FormNotFound)));
}

#[tokio::test]
async fn test_ratings_clamped_to_storable_range() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "clamp", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;
    let q1 = create_test_question(pool, "Q1", "theory", "scale_1_10").await;
    let q2 = create_test_question(pool, "Q2", "theory", "scale_1_10").await;

    let response_id = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![
            RatingInput { question_id: q1, rating: 42.0 },
            RatingInput { question_id: q2, rating: -3.0 },
        ]),
    )
    .await
    .expect("submit");

    let items = response::find_items(pool, response_id).await.expect("items");
    assert_eq!(items[0].rating, 10.0);
    assert_eq!(items[1].rating, 0.0);
}

#[tokio::test]
async fn test_unknown_question_aborts_whole_submission() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "unknownq", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;
    let q = create_test_question(pool, "Q", "theory", "scale_1_10").await;

    let result = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![
            RatingInput { question_id: q, rating: 5.0 },
            RatingInput { question_id: 999_999, rating: 5.0 },
        ]),
    )
    .await;
    assert!(matches!(result, Err(SubmissionError::UnknownQuestion(999_999))));

    // The transaction rolled back: no partial response row.
    let responses = response::find_by_form(pool, form_id).await.expect("list");
    assert!(responses.is_empty());
}

#[tokio::test]
async fn test_snapshots_survive_question_edit_and_delete() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let student_id = create_test_student(pool, "snapshot", "B1").await;
    let form_id = create_test_form(pool, "DBMS", "prof@test.edu").await;
    let q_edit = create_test_question(pool, "Original text", "theory", "scale_3").await;

    let response_id = response::submit(
        pool,
        form_id,
        student_id,
        &request(vec![RatingInput { question_id: q_edit, rating: 2.0 }]),
    )
    .await
    .expect("submit");

    // Edit the catalog question; the stored snapshot must not move.
    question::update(
        pool,
        q_edit,
        &NewQuestion {
            text: "Rewritten text".to_string(),
            position: 9,
            form_type: "theory".to_string(),
            question_type: "yes_no".to_string(),
        },
    )
    .await
    .expect("update question");

    let items = response::find_items(pool, response_id).await.expect("items");
    assert_eq!(items[0].question_text, "Original text");
    assert_eq!(items[0].question_type, "scale_3");

    // Deleting is blocked while the reference exists.
    let blocked = question::delete(pool, q_edit).await;
    assert!(blocked.is_err(), "delete must be blocked by references");
}
