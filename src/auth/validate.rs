/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate a semester number: 1-8.
pub fn validate_semester(semester: i64) -> Option<String> {
    if !(1..=8).contains(&semester) {
        return Some("Semester must be between 1 and 8".to_string());
    }
    None
}

/// Validate a form/question category tag.
pub fn validate_form_type(form_type: &str) -> Option<String> {
    match form_type {
        "theory" | "lab" => None,
        _ => Some("Form type must be 'theory' or 'lab'".to_string()),
    }
}

/// Validate a question response-type tag.
pub fn validate_question_type(question_type: &str) -> Option<String> {
    match question_type {
        "scale_3" | "scale_1_10" | "yes_no" => None,
        _ => Some("Question type must be 'scale_3', 'scale_1_10', or 'yes_no'".to_string()),
    }
}
