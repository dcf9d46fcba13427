use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::requests::{AttendanceEntry, MarkAttendanceRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, found, not_found, respond_on_err, stored,
};

/// Rejects empty sheets, future dates and a student listed twice.
pub(crate) fn check_sheet(
    date: NaiveDate,
    entries: &[AttendanceEntry],
    today: NaiveDate,
) -> Result<(), String> {
    if entries.is_empty() {
        return Err("At least one attendance entry is required".to_string());
    }
    if date > today {
        return Err("Attendance cannot be marked for a future date".to_string());
    }
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.student_id) {
            return Err(format!("Student {} appears more than once", entry.student_id));
        }
    }
    Ok(())
}

impl AttendanceService {
    pub async fn mark_attendance(
        &self,
        req: MarkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = check_sheet(req.date, &req.entries, chrono::Utc::now().date_naive()) {
            return Ok(bad_request(ErrorCode::AttendanceInvalid, msg));
        }

        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);

        respond_on_err!(found(
            storage.get_classroom(req.classroom_id).await,
            ErrorCode::NotFound,
            "Classroom not found",
        ));

        let ids: Vec<i64> = req.entries.iter().map(|e| e.student_id).collect();
        let existing: HashSet<i64> = respond_on_err!(stored(storage.existing_student_ids(&ids).await))
            .into_iter()
            .collect();
        if let Some(missing) = ids.iter().find(|id| !existing.contains(id)) {
            return Ok(not_found(
                ErrorCode::StudentNotFound,
                format!("Student {missing} not found"),
            ));
        }

        let classroom_id = req.classroom_id;
        let date = req.date;
        match storage.mark_attendance(req, user.id).await {
            Ok(result) => {
                info!(
                    "Attendance for classroom {} on {}: {} created, {} updated",
                    classroom_id, date, result.created, result.updated
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Attendance marked")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;

    fn entry(student_id: i64) -> AttendanceEntry {
        AttendanceEntry {
            student_id,
            status: AttendanceStatus::Present,
            notes: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).expect("valid date")
    }

    #[test]
    fn test_valid_sheet() {
        assert!(check_sheet(day(10), &[entry(1), entry(2)], day(10)).is_ok());
    }

    #[test]
    fn test_rejected_sheets() {
        assert!(check_sheet(day(10), &[], day(10)).is_err());
        assert!(check_sheet(day(11), &[entry(1)], day(10)).is_err());
        let err = check_sheet(day(10), &[entry(1), entry(2), entry(1)], day(10))
            .expect_err("duplicate student");
        assert!(err.contains("Student 1"));
    }
}
