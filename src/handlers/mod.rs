pub mod admin_handlers;
pub mod faculty_handlers;
pub mod form_handlers;
pub mod identity_handlers;
pub mod question_handlers;
pub mod report_handlers;
pub mod response_handlers;
pub mod student_handlers;
pub mod timetable_handlers;

use actix_web::web;

/// Wire every /api/v1 route. Fixed segments (bulk, generate, extract, ...)
/// are registered before their `{id}` siblings to avoid routing conflicts.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/me", web::get().to(identity_handlers::me))
            // Question catalog
            .route("/questions", web::get().to(question_handlers::list))
            .route("/questions", web::post().to(question_handlers::create))
            .route("/questions/{id}", web::put().to(question_handlers::update))
            .route("/questions/{id}", web::delete().to(question_handlers::delete))
            // Form instances
            .route("/forms", web::get().to(form_handlers::list))
            .route("/forms", web::post().to(form_handlers::create))
            .route("/forms/generate", web::post().to(form_handlers::generate))
            .route("/forms/{id}", web::get().to(form_handlers::read))
            .route("/forms/{id}/status", web::put().to(form_handlers::update_status))
            .route("/forms/{id}", web::delete().to(form_handlers::delete))
            // Responses
            .route("/forms/{id}/responses", web::post().to(response_handlers::submit))
            .route("/forms/{id}/responses", web::get().to(response_handlers::list_for_form))
            .route("/responses/{id}", web::delete().to(response_handlers::delete))
            // Students
            .route("/students", web::get().to(student_handlers::list))
            .route("/students", web::post().to(student_handlers::create))
            .route("/students/bulk", web::post().to(student_handlers::bulk_create))
            .route("/students/bulk-delete", web::post().to(student_handlers::bulk_delete))
            .route("/students/{id}", web::put().to(student_handlers::update))
            .route("/students/{id}", web::delete().to(student_handlers::delete))
            // Faculty
            .route("/faculty", web::get().to(faculty_handlers::list))
            .route("/faculty", web::post().to(faculty_handlers::create))
            .route("/faculty/bulk", web::post().to(faculty_handlers::bulk_create))
            .route("/faculty/{id}", web::put().to(faculty_handlers::update))
            .route("/faculty/{id}", web::delete().to(faculty_handlers::delete))
            // Admin users
            .route("/admins", web::get().to(admin_handlers::list))
            .route("/admins", web::post().to(admin_handlers::create))
            .route("/admins/{id}", web::delete().to(admin_handlers::delete))
            // Timetable
            .route("/timetable/entries", web::get().to(timetable_handlers::list))
            .route("/timetable/entries", web::post().to(timetable_handlers::create))
            .route("/timetable/entries/{id}", web::delete().to(timetable_handlers::delete))
            .route("/timetable/import", web::post().to(timetable_handlers::import_csv))
            .route("/timetable/export", web::get().to(timetable_handlers::export_csv))
            .route("/timetable/extract", web::post().to(timetable_handlers::extract))
            .route("/timetable/sheet-import", web::post().to(timetable_handlers::sheet_import))
            .route("/timetable/images", web::get().to(timetable_handlers::list_images))
            .route("/timetable/images", web::post().to(timetable_handlers::upload_image))
            .route("/timetable/images/{id}", web::delete().to(timetable_handlers::delete_image))
            // Reports
            .route("/reports/form/{id}", web::get().to(report_handlers::form_report))
            .route("/reports/faculty", web::get().to(report_handlers::faculty_standings)),
    );
}
