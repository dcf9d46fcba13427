use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::attendance::requests::AttendanceFilter;
use crate::models::grades::entities::ReportCard;
use crate::models::students::requests::ReportCardParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::attendance::summary::summarize;
use crate::services::grades::calc;
use crate::services::{accessible_student, current_user, found, respond_on_err, stored};

/// Term report card: one row per subject, credit-weighted GPA and the
/// attendance summary over the term's dates.
pub async fn report_card(
    service: &StudentService,
    id: i64,
    query: ReportCardParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = respond_on_err!(current_user(request));
    let storage = service.get_storage(request);

    let student = respond_on_err!(accessible_student(storage.as_ref(), &user, id).await);
    let term = respond_on_err!(found(
        storage.get_term(query.term_id).await,
        ErrorCode::NotFound,
        "Term not found",
    ));

    let entries = respond_on_err!(stored(
        storage.list_report_entries(student.id, term.id).await
    ));
    let subjects = calc::subject_reports(&entries);
    let gpa = calc::gpa(&subjects);
    let overall_percentage = calc::overall_percentage(&subjects);

    let counts = respond_on_err!(stored(
        storage
            .count_attendance(AttendanceFilter {
                student_id: Some(student.id),
                from: Some(term.start_date),
                to: Some(term.end_date),
                ..Default::default()
            })
            .await
    ));
    let attendance = summarize(counts, Some(term.start_date), Some(term.end_date));

    let report = ReportCard {
        student,
        term,
        subjects,
        gpa,
        overall_percentage,
        overall_letter_grade: overall_percentage.map(calc::letter_grade),
        attendance,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Report card generated")))
}
