use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::attendance_records::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::errors::Result;
use crate::models::PaginatedResponse;
use crate::models::attendance::{
    entities::{AttendanceCounts, AttendanceRecord, AttendanceStatus},
    requests::{AttendanceFilter, MarkAttendanceRequest, UpdateAttendanceRequest},
    responses::MarkAttendanceResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    TransactionTrait,
};

fn apply_filter(
    mut select: Select<AttendanceRecords>,
    filter: &AttendanceFilter,
) -> Select<AttendanceRecords> {
    if let Some(classroom_id) = filter.classroom_id {
        select = select.filter(Column::ClassroomId.eq(classroom_id));
    }
    if let Some(student_id) = filter.student_id {
        select = select.filter(Column::StudentId.eq(student_id));
    }
    if let Some(status) = filter.status {
        select = select.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(from) = filter.from {
        select = select.filter(Column::Date.gte(from));
    }
    if let Some(to) = filter.to {
        select = select.filter(Column::Date.lte(to));
    }
    select
}

impl SeaOrmStorage {
    /// Upserts one record per entry keyed on (student, date) inside a
    /// single transaction.
    pub async fn mark_attendance_impl(
        &self,
        req: MarkAttendanceRequest,
        recorded_by: i64,
    ) -> Result<MarkAttendanceResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let now = now_ts();
        let mut created = 0;
        let mut updated = 0;
        let mut records = Vec::with_capacity(req.entries.len());

        for entry in req.entries {
            let existing = AttendanceRecords::find()
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::Date.eq(req.date))
                .one(&txn)
                .await
                .map_err(db_error("Failed to query attendance"))?;

            let row = match existing {
                Some(existing) => {
                    let model = ActiveModel {
                        id: Set(existing.id),
                        classroom_id: Set(req.classroom_id),
                        status: Set(entry.status.to_string()),
                        notes: Set(entry.notes),
                        recorded_by: Set(recorded_by),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    updated += 1;
                    model
                        .update(&txn)
                        .await
                        .map_err(db_error("Failed to update attendance"))?
                }
                None => {
                    let model = ActiveModel {
                        student_id: Set(entry.student_id),
                        classroom_id: Set(req.classroom_id),
                        date: Set(req.date),
                        status: Set(entry.status.to_string()),
                        notes: Set(entry.notes),
                        recorded_by: Set(recorded_by),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    created += 1;
                    model
                        .insert(&txn)
                        .await
                        .map_err(db_error("Failed to record attendance"))?
                }
            };
            records.push(row.into_attendance_record());
        }

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(MarkAttendanceResponse {
            created,
            updated,
            records,
        })
    }

    pub async fn get_attendance_impl(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        let row = AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query attendance"))?;
        Ok(row.map(|m| m.into_attendance_record()))
    }

    pub async fn list_attendance_impl(
        &self,
        page: i64,
        size: i64,
        filter: AttendanceFilter,
    ) -> Result<PaginatedResponse<AttendanceRecord>> {
        let select = apply_filter(AttendanceRecords::find(), &filter)
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list attendance")
            .await?;
        Ok(PaginatedResponse {
            items: rows
                .into_iter()
                .map(|m| m.into_attendance_record())
                .collect(),
            pagination,
        })
    }

    pub async fn update_attendance_impl(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        if self.get_attendance_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }
        if let Some(notes) = req.notes {
            model.notes = Set(Some(notes));
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update attendance"))?;
        Ok(Some(row.into_attendance_record()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete attendance"))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_attendance_impl(&self, filter: AttendanceFilter) -> Result<AttendanceCounts> {
        let rows: Vec<(String, i64)> = apply_filter(AttendanceRecords::find(), &filter)
            .select_only()
            .column(Column::Status)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to count attendance"))?;

        let mut counts = AttendanceCounts::default();
        for (status, count) in rows {
            if let Ok(status) = status.parse::<AttendanceStatus>() {
                counts.add(status, count);
            }
        }
        Ok(counts)
    }
}
