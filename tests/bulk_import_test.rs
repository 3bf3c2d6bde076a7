//! Integration tests for bulk people imports.

mod common;

use common::setup_test_db;
use facfeed::models::faculty::{self, NewFaculty};
use facfeed::models::student::{self, NewStudent};

fn student_row(email: &str, division: &str) -> NewStudent {
    NewStudent {
        name: "Bulk Student".to_string(),
        email: email.to_string(),
        roll_no: String::new(),
        semester: 3,
        course: "IT".to_string(),
        division: division.to_string(),
        batch: "B1".to_string(),
    }
}

#[tokio::test]
async fn test_student_bulk_import_partial_success() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let rows = vec![
        student_row("a@test.edu", "A"),
        student_row("b@test.edu", "A"),
        student_row("c@test.edu", ""), // missing division
    ];

    let result = student::bulk_create(pool, &rows).await.expect("bulk");
    assert_eq!(result.created, 2);
    assert_eq!(result.skipped, 0);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].reason.contains("Division"));

    let all = student::find_all(pool).await.expect("list");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_student_bulk_import_duplicate_email_skipped() {
    let db = setup_test_db().await;
    let pool = db.pool();

    student::create(pool, &student_row("dup@test.edu", "A"))
        .await
        .expect("create");

    let rows = vec![
        // Same address with different casing — emails are stored lowercase.
        student_row("DUP@test.edu", "A"),
        student_row("fresh@test.edu", "A"),
    ];
    let result = student::bulk_create(pool, &rows).await.expect("bulk");
    assert_eq!(result.created, 1);
    assert_eq!(result.skipped, 1);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_faculty_bulk_import() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let rows = vec![
        NewFaculty {
            name: "Prof A".to_string(),
            email: "a@staff.test.edu".to_string(),
            code: Some("pa".to_string()),
            department: "IT".to_string(),
        },
        NewFaculty {
            name: String::new(), // invalid
            email: "b@staff.test.edu".to_string(),
            code: None,
            department: "IT".to_string(),
        },
    ];

    let result = faculty::bulk_create(pool, &rows).await.expect("bulk");
    assert_eq!(result.created, 1);
    assert_eq!(result.errors.len(), 1);

    // Codes are normalized to uppercase on insert.
    let stored = faculty::find_by_code(pool, "PA").await.expect("query");
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_student_bulk_delete_reports_missing_ids() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let id = student::create(pool, &student_row("del@test.edu", "A"))
        .await
        .expect("create");

    let result = student::bulk_delete(pool, &[id, 999_999]).await.expect("bulk delete");
    assert_eq!(result.deleted, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(student::find_by_id(pool, id).await.expect("query").is_none());
}
