use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, db_error, now_ts, today};
use crate::entity::{fee_structures, invoice_lines, invoices, payments, student_profiles};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::fees::{
    entities::{FeeStructure, Invoice, InvoiceStatus, NewPayment, Payment, StatusCount},
    requests::{
        CreateFeeStructureRequest, CreateInvoiceRequest, GenerateInvoicesRequest, InvoiceFilter,
        InvoiceLineInput, UpdateFeeStructureRequest,
    },
    responses::{FeeSummary, GenerateInvoicesResponse, InvoiceDetail},
};
use crate::models::students::entities::AcademicStatus;
use crate::services::fees::ledger;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

/// Sum of payments per invoice. Summed in Rust so the result type does not
/// depend on the backend's SUM() return type.
async fn paid_totals<C: ConnectionTrait>(
    conn: &C,
    invoice_ids: Vec<i64>,
) -> Result<HashMap<i64, i64>> {
    if invoice_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(i64, i64)> = payments::Entity::find()
        .select_only()
        .column(payments::Column::InvoiceId)
        .column(payments::Column::AmountCents)
        .filter(payments::Column::InvoiceId.is_in(invoice_ids))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_error("Failed to load payments"))?;

    let mut totals = HashMap::new();
    for (invoice_id, amount) in rows {
        *totals.entry(invoice_id).or_insert(0) += amount;
    }
    Ok(totals)
}

/// Inserts an invoice with its lines and assigns the final invoice number.
async fn insert_invoice<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    term_id: i64,
    due_date: Option<NaiveDate>,
    notes: Option<String>,
    lines: Vec<InvoiceLineInput>,
    created_by: i64,
) -> Result<invoices::Model> {
    let now = now_ts();
    let total_cents: i64 = lines.iter().map(|l| l.amount_cents).sum();

    let header = invoices::ActiveModel {
        invoice_number: Set(ledger::pending_number("INV")),
        student_id: Set(student_id),
        term_id: Set(term_id),
        status: Set(InvoiceStatus::Issued.to_string()),
        issue_date: Set(today()),
        due_date: Set(due_date),
        total_cents: Set(total_cents),
        notes: Set(notes),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_error("Failed to create invoice"))?;

    for line in lines {
        invoice_lines::ActiveModel {
            invoice_id: Set(header.id),
            description: Set(line.description),
            amount_cents: Set(line.amount_cents),
            fee_structure_id: Set(line.fee_structure_id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(db_error("Failed to create invoice line"))?;
    }

    let numbered = invoices::ActiveModel {
        id: Set(header.id),
        invoice_number: Set(ledger::invoice_number(header.id)),
        ..Default::default()
    }
    .update(conn)
    .await
    .map_err(db_error("Failed to number invoice"))?;
    Ok(numbered)
}

impl SeaOrmStorage {
    // Fee structures

    pub async fn create_fee_structure_impl(
        &self,
        req: CreateFeeStructureRequest,
    ) -> Result<FeeStructure> {
        let now = now_ts();
        let model = fee_structures::ActiveModel {
            grade_level_id: Set(req.grade_level_id),
            term_id: Set(req.term_id),
            fee_type: Set(req.fee_type.to_string()),
            amount_cents: Set(req.amount_cents),
            description: Set(req.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let row = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create fee structure"))?;
        Ok(row.into_fee_structure())
    }

    pub async fn get_fee_structure_impl(&self, id: i64) -> Result<Option<FeeStructure>> {
        let row = fee_structures::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query fee structure"))?;
        Ok(row.map(|m| m.into_fee_structure()))
    }

    pub async fn list_fee_structures_impl(
        &self,
        page: i64,
        size: i64,
        grade_level_id: Option<i64>,
        term_id: Option<i64>,
    ) -> Result<PaginatedResponse<FeeStructure>> {
        let mut select = fee_structures::Entity::find();
        if let Some(grade_level_id) = grade_level_id {
            select = select.filter(fee_structures::Column::GradeLevelId.eq(grade_level_id));
        }
        if let Some(term_id) = term_id {
            select = select.filter(fee_structures::Column::TermId.eq(term_id));
        }
        select = select
            .order_by_asc(fee_structures::Column::GradeLevelId)
            .order_by_asc(fee_structures::Column::FeeType);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list fee structures")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_fee_structure()).collect(),
            pagination,
        })
    }

    pub async fn update_fee_structure_impl(
        &self,
        id: i64,
        req: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>> {
        if self.get_fee_structure_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = fee_structures::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(amount_cents) = req.amount_cents {
            model.amount_cents = Set(amount_cents);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }

        let row = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update fee structure"))?;
        Ok(Some(row.into_fee_structure()))
    }

    pub async fn delete_fee_structure_impl(&self, id: i64) -> Result<bool> {
        let result = fee_structures::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete fee structure"))?;
        Ok(result.rows_affected > 0)
    }

    // Invoices

    pub async fn create_invoice_impl(
        &self,
        req: CreateInvoiceRequest,
        created_by: i64,
    ) -> Result<InvoiceDetail> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;
        let invoice = insert_invoice(
            &txn,
            req.student_id,
            req.term_id,
            req.due_date,
            req.notes,
            req.lines,
            created_by,
        )
        .await?;
        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        self.get_invoice_detail_impl(invoice.id)
            .await?
            .ok_or_else(|| SchoolError::not_found("Invoice not found after creation"))
    }

    pub async fn generate_invoices_impl(
        &self,
        req: GenerateInvoicesRequest,
        created_by: i64,
    ) -> Result<GenerateInvoicesResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let structures = fee_structures::Entity::find()
            .filter(fee_structures::Column::GradeLevelId.eq(req.grade_level_id))
            .filter(fee_structures::Column::TermId.eq(req.term_id))
            .filter(fee_structures::Column::IsActive.eq(true))
            .order_by_asc(fee_structures::Column::FeeType)
            .all(&txn)
            .await
            .map_err(db_error("Failed to load fee structures"))?;
        if structures.is_empty() {
            return Err(SchoolError::validation(
                "No active fee structures for this grade level and term",
            ));
        }

        let student_ids: Vec<i64> = student_profiles::Entity::find()
            .select_only()
            .column(student_profiles::Column::Id)
            .filter(student_profiles::Column::GradeLevelId.eq(req.grade_level_id))
            .filter(student_profiles::Column::AcademicStatus.eq(AcademicStatus::Active.as_str()))
            .filter(student_profiles::Column::DeletedAt.is_null())
            .order_by_asc(student_profiles::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_error("Failed to load students"))?;

        let already_invoiced: HashSet<i64> = invoices::Entity::find()
            .select_only()
            .column(invoices::Column::StudentId)
            .filter(invoices::Column::TermId.eq(req.term_id))
            .filter(invoices::Column::StudentId.is_in(student_ids.clone()))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(db_error("Failed to load invoices"))?
            .into_iter()
            .collect();

        let lines: Vec<InvoiceLineInput> = structures
            .iter()
            .map(|s| InvoiceLineInput {
                description: s
                    .description
                    .clone()
                    .unwrap_or_else(|| s.fee_type.replace('_', " ")),
                amount_cents: s.amount_cents,
                fee_structure_id: Some(s.id),
            })
            .collect();

        let mut invoice_numbers = Vec::new();
        let mut skipped = 0;
        for student_id in student_ids {
            if already_invoiced.contains(&student_id) {
                skipped += 1;
                continue;
            }
            let invoice = insert_invoice(
                &txn,
                student_id,
                req.term_id,
                req.due_date,
                None,
                lines.clone(),
                created_by,
            )
            .await?;
            invoice_numbers.push(invoice.invoice_number);
        }

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        info!(
            "Generated {} invoices for grade level {} term {} ({} skipped)",
            invoice_numbers.len(),
            req.grade_level_id,
            req.term_id,
            skipped
        );
        Ok(GenerateInvoicesResponse {
            created: invoice_numbers.len() as i64,
            skipped,
            invoice_numbers,
        })
    }

    pub async fn get_invoice_impl(&self, id: i64) -> Result<Option<Invoice>> {
        let Some(row) = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query invoice"))?
        else {
            return Ok(None);
        };
        let paid = paid_totals(&self.db, vec![id]).await?;
        let paid_cents = paid.get(&id).copied().unwrap_or(0);
        Ok(Some(row.into_invoice(paid_cents, today())))
    }

    pub async fn get_invoice_detail_impl(&self, id: i64) -> Result<Option<InvoiceDetail>> {
        let Some(invoice) = self.get_invoice_impl(id).await? else {
            return Ok(None);
        };

        let lines = invoice_lines::Entity::find()
            .filter(invoice_lines::Column::InvoiceId.eq(id))
            .order_by_asc(invoice_lines::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load invoice lines"))?
            .into_iter()
            .map(|l| l.into_invoice_line())
            .collect();
        let payments = self.list_payments_impl(id).await?;

        Ok(Some(InvoiceDetail {
            invoice,
            lines,
            payments,
        }))
    }

    pub async fn list_invoices_impl(
        &self,
        page: i64,
        size: i64,
        filter: InvoiceFilter,
    ) -> Result<PaginatedResponse<Invoice>> {
        let mut select = invoices::Entity::find();
        if let Some(student_id) = filter.student_id {
            select = select.filter(invoices::Column::StudentId.eq(student_id));
        }
        if let Some(student_ids) = filter.student_ids {
            select = select.filter(invoices::Column::StudentId.is_in(student_ids));
        }
        if let Some(term_id) = filter.term_id {
            select = select.filter(invoices::Column::TermId.eq(term_id));
        }
        if let Some(status) = filter.status {
            select = select.filter(invoices::Column::Status.eq(status.as_str()));
        }
        select = select.order_by_desc(invoices::Column::Id);

        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list invoices")
            .await?;
        let paid = paid_totals(&self.db, rows.iter().map(|r| r.id).collect()).await?;
        let today = today();

        Ok(PaginatedResponse {
            items: rows
                .into_iter()
                .map(|row| {
                    let paid_cents = paid.get(&row.id).copied().unwrap_or(0);
                    row.into_invoice(paid_cents, today)
                })
                .collect(),
            pagination,
        })
    }

    async fn payment_count(&self, invoice_id: i64) -> Result<u64> {
        payments::Entity::find()
            .filter(payments::Column::InvoiceId.eq(invoice_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count payments"))
    }

    pub async fn cancel_invoice_impl(&self, id: i64) -> Result<Option<Invoice>> {
        let Some(invoice) = self.get_invoice_impl(id).await? else {
            return Ok(None);
        };
        if invoice.status == InvoiceStatus::Cancelled {
            return Err(SchoolError::validation("Invoice is already cancelled"));
        }
        if self.payment_count(id).await? > 0 {
            return Err(SchoolError::validation(
                "Invoice has payments and cannot be cancelled",
            ));
        }

        invoices::ActiveModel {
            id: Set(id),
            status: Set(InvoiceStatus::Cancelled.to_string()),
            updated_at: Set(now_ts()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error("Failed to cancel invoice"))?;

        self.get_invoice_impl(id).await
    }

    pub async fn delete_invoice_impl(&self, id: i64) -> Result<bool> {
        if self.get_invoice_impl(id).await?.is_none() {
            return Ok(false);
        }
        if self.payment_count(id).await? > 0 {
            return Err(SchoolError::validation(
                "Invoice has payments and cannot be deleted",
            ));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;
        invoice_lines::Entity::delete_many()
            .filter(invoice_lines::Column::InvoiceId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to delete invoice lines"))?;
        let result = invoices::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error("Failed to delete invoice"))?;
        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(result.rows_affected > 0)
    }

    // Payments

    pub async fn record_payment_impl(&self, payment: NewPayment) -> Result<Payment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        // Row lock held until commit so concurrent payments see each other's
        // totals. SQLite serializes writers instead and drops the clause.
        let invoice = invoices::Entity::find_by_id(payment.invoice_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error("Failed to query invoice"))?
            .ok_or_else(|| SchoolError::not_found("Invoice not found"))?;
        let status = invoice
            .status
            .parse::<InvoiceStatus>()
            .map_err(SchoolError::validation)?;
        let paid_before = paid_totals(&txn, vec![invoice.id])
            .await?
            .get(&invoice.id)
            .copied()
            .unwrap_or(0);

        ledger::check_payment(status, invoice.total_cents, paid_before, payment.amount_cents)
            .map_err(SchoolError::validation)?;

        let now = now_ts();
        let inserted = payments::ActiveModel {
            invoice_id: Set(invoice.id),
            amount_cents: Set(payment.amount_cents),
            method: Set(payment.method.to_string()),
            reference: Set(payment.reference),
            transaction_id: Set(payment.transaction_id),
            receipt_number: Set(ledger::pending_number("RCT")),
            paid_on: Set(payment.paid_on),
            received_by: Set(payment.received_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to record payment"))?;

        let receipt = payments::ActiveModel {
            id: Set(inserted.id),
            receipt_number: Set(ledger::receipt_number(inserted.id)),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_error("Failed to number receipt"))?;

        let new_status = ledger::status_for(invoice.total_cents, paid_before + payment.amount_cents);
        invoices::ActiveModel {
            id: Set(invoice.id),
            status: Set(new_status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_error("Failed to update invoice status"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(receipt.into_payment())
    }

    pub async fn get_payment_impl(&self, id: i64) -> Result<Option<Payment>> {
        let row = payments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query payment"))?;
        Ok(row.map(|m| m.into_payment()))
    }

    pub async fn list_payments_impl(&self, invoice_id: i64) -> Result<Vec<Payment>> {
        let rows = payments::Entity::find()
            .filter(payments::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list payments"))?;
        Ok(rows.into_iter().map(|m| m.into_payment()).collect())
    }

    /// Totals leave cancelled invoices out; the per-status counts include them.
    pub async fn fee_summary_impl(&self, term_id: Option<i64>) -> Result<FeeSummary> {
        let mut select = invoices::Entity::find();
        if let Some(term_id) = term_id {
            select = select.filter(invoices::Column::TermId.eq(term_id));
        }
        let rows: Vec<(i64, String, i64)> = select
            .select_only()
            .column(invoices::Column::Id)
            .column(invoices::Column::Status)
            .column(invoices::Column::TotalCents)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load invoices"))?;

        let paid = paid_totals(&self.db, rows.iter().map(|r| r.0).collect()).await?;

        let mut summary = FeeSummary {
            term_id,
            ..Default::default()
        };
        let mut by_status: HashMap<InvoiceStatus, i64> = HashMap::new();
        for (id, status, total) in rows {
            let status = status.parse::<InvoiceStatus>().unwrap_or(InvoiceStatus::Issued);
            *by_status.entry(status).or_insert(0) += 1;
            if status == InvoiceStatus::Cancelled {
                continue;
            }
            let paid_cents = paid.get(&id).copied().unwrap_or(0);
            summary.invoice_count += 1;
            summary.invoiced_cents += total;
            summary.collected_cents += paid_cents;
            summary.outstanding_cents += ledger::outstanding(total, paid_cents);
        }

        summary.by_status = InvoiceStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: by_status.get(status).copied().unwrap_or(0),
            })
            .collect();
        Ok(summary)
    }
}
