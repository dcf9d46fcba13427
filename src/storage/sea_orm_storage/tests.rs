use chrono::NaiveDate;
use sea_orm::SqlxSqliteConnector;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use super::SeaOrmStorage;
use crate::errors::SchoolError;
use crate::models::admissions::{
    entities::ApplicationStatus,
    requests::{ApplicationFilter, EnrollApplicationRequest, SubmitApplicationRequest},
};
use crate::models::academics::requests::{
    CreateGradeLevelRequest, CreateSubjectRequest, CreateTermRequest,
};
use crate::models::assessments::{entities::AssessmentKind, requests::CreateAssessmentRequest};
use crate::models::attendance::{
    entities::AttendanceStatus,
    requests::{AttendanceEntry, AttendanceFilter, MarkAttendanceRequest},
};
use crate::models::blog::{
    entities::{PostCategory, PostStatus},
    requests::{CreatePostRequest, PostFilter},
};
use crate::models::fees::{
    entities::{FeeType, InvoiceStatus, NewPayment, PaymentMethod},
    requests::{
        CreateFeeStructureRequest, CreateInvoiceRequest, GenerateInvoicesRequest, InvoiceLineInput,
    },
};
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::hr::{
    entities::LeaveStatus,
    requests::{CreateEmployeeRequest, CreateLeaveRequest},
};
use crate::models::inventory::{
    entities::{ItemCategory, TransactionKind},
    requests::{CreateItemRequest, ItemFilter, StockMovementRequest},
};
use crate::models::messaging::{entities::ThreadKind, requests::CreateThreadRequest};
use crate::models::students::{
    entities::Gender,
    requests::{CreateStudentRequest, StudentListQuery},
};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{CreateUserRequest, UserListQuery},
};
use crate::services::blog::slug::create_with_free_slug;
use crate::storage::Storage;

async fn memory_storage() -> SeaOrmStorage {
    let opt = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid url")
        .foreign_keys(true);
    // A single connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opt)
        .await
        .expect("in-memory sqlite");
    SeaOrmStorage::with_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        .await
        .expect("migrations run")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

async fn user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@regis.test"),
            password: "hash".to_string(),
            role,
            first_name: username.to_string(),
            last_name: "Moyo".to_string(),
            phone: None,
        })
        .await
        .expect("user created")
}

/// Grade level, current term and one enrolled student.
struct Fixture {
    grade_level_id: i64,
    term_id: i64,
    student_id: i64,
    admin_id: i64,
}

async fn fixture(storage: &SeaOrmStorage) -> Fixture {
    let admin = user(storage, "admin01", UserRole::Admin).await;
    let grade = storage
        .create_grade_level(CreateGradeLevelRequest {
            name: "Form 1".to_string(),
            level: 1,
            description: None,
        })
        .await
        .expect("grade level");
    let term = storage
        .create_term(CreateTermRequest {
            name: "Term 1".to_string(),
            academic_year: "2025".to_string(),
            start_date: date(2025, 1, 13),
            end_date: date(2025, 4, 4),
        })
        .await
        .expect("term");
    let student_user = user(storage, "tariro", UserRole::Student).await;
    let student = storage
        .create_student(CreateStudentRequest {
            user_id: student_user.id,
            admission_number: "ADM-0001".to_string(),
            grade_level_id: grade.id,
            classroom_id: None,
            gender: None,
            date_of_birth: None,
            enrollment_date: Some(date(2025, 1, 13)),
            is_boarder: false,
            medical_notes: None,
        })
        .await
        .expect("student");

    Fixture {
        grade_level_id: grade.id,
        term_id: term.id,
        student_id: student.id,
        admin_id: admin.id,
    }
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let storage = memory_storage().await;
    user(&storage, "chipo01", UserRole::Teacher).await;

    let err = storage
        .create_user(CreateUserRequest {
            username: "chipo01".to_string(),
            email: "other@regis.test".to_string(),
            password: "hash".to_string(),
            role: UserRole::Teacher,
            first_name: "Chipo".to_string(),
            last_name: "Dube".to_string(),
            phone: None,
        })
        .await
        .expect_err("duplicate username");
    assert!(matches!(err, SchoolError::Conflict(_)));
}

#[tokio::test]
async fn test_pagination_totals_follow_filter() {
    let storage = memory_storage().await;
    for i in 0..7 {
        user(&storage, &format!("teacher{i}"), UserRole::Teacher).await;
    }
    user(&storage, "parent01", UserRole::Parent).await;

    let page = storage
        .list_users_with_pagination(UserListQuery {
            page: 2,
            size: 3,
            role: Some(UserRole::Teacher),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(page.pagination.total, 7);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.items.len(), 3);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let storage = memory_storage().await;
    user(&storage, "teacher0", UserRole::Teacher).await;

    for page in [2, i64::MAX / 100 + 1, i64::MAX] {
        let listed = storage
            .list_users_with_pagination(UserListQuery {
                page,
                size: 100,
                ..Default::default()
            })
            .await
            .expect("list");
        assert!(listed.items.is_empty());
        assert_eq!(listed.pagination.page, page);
        assert_eq!(listed.pagination.total, 1);
        assert_eq!(listed.pagination.total_pages, 1);
    }
}

#[tokio::test]
async fn test_only_one_current_term() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;
    let second = storage
        .create_term(CreateTermRequest {
            name: "Term 2".to_string(),
            academic_year: "2025".to_string(),
            start_date: date(2025, 5, 5),
            end_date: date(2025, 8, 1),
        })
        .await
        .expect("term");

    storage.set_current_term(f.term_id).await.expect("set");
    storage.set_current_term(second.id).await.expect("set");

    let current = storage.get_current_term().await.expect("query").expect("one current");
    assert_eq!(current.id, second.id);
    let first = storage.get_term(f.term_id).await.expect("query").expect("exists");
    assert!(!first.is_current);
    assert!(storage.set_current_term(9_999).await.expect("query").is_none());
}

#[tokio::test]
async fn test_student_search_and_soft_delete() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;

    let found = storage
        .list_students(StudentListQuery {
            page: 1,
            size: 10,
            search: Some("tari".to_string()),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(found.pagination.total, 1);
    assert_eq!(found.items[0].admission_number, "ADM-0001");

    let other = user(&storage, "rudo", UserRole::Student).await;
    let err = storage
        .create_student(CreateStudentRequest {
            user_id: other.id,
            admission_number: "ADM-0001".to_string(),
            grade_level_id: f.grade_level_id,
            classroom_id: None,
            gender: None,
            date_of_birth: None,
            enrollment_date: None,
            is_boarder: false,
            medical_notes: None,
        })
        .await
        .expect_err("duplicate admission number");
    assert!(matches!(err, SchoolError::Conflict(_)));

    assert!(storage.soft_delete_student(f.student_id).await.expect("delete"));
    assert!(storage.get_student(f.student_id).await.expect("query").is_none());
    assert!(!storage.soft_delete_student(f.student_id).await.expect("delete"));
}

#[tokio::test]
async fn test_grades_and_report_entries() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;
    let subject = storage
        .create_subject(CreateSubjectRequest {
            code: "MATH".to_string(),
            name: "Mathematics".to_string(),
            description: None,
            credit_hours: 4,
        })
        .await
        .expect("subject");
    let exam = storage
        .create_assessment(
            CreateAssessmentRequest {
                name: "Mid-term".to_string(),
                kind: AssessmentKind::Exam,
                term_id: f.term_id,
                subject_id: subject.id,
                classroom_id: None,
                max_score: 50.0,
                weight: 2.0,
                held_on: None,
                description: None,
            },
            f.admin_id,
        )
        .await
        .expect("assessment");

    let grade = storage
        .create_grade(
            CreateGradeRequest {
                student_id: f.student_id,
                assessment_id: exam.id,
                score: 40.0,
                comments: None,
            },
            f.admin_id,
        )
        .await
        .expect("grade");
    assert_eq!(grade.percentage, 80.0);

    let err = storage
        .create_grade(
            CreateGradeRequest {
                student_id: f.student_id,
                assessment_id: exam.id,
                score: 10.0,
                comments: None,
            },
            f.admin_id,
        )
        .await
        .expect_err("one grade per assessment");
    assert!(matches!(err, SchoolError::Conflict(_)));

    let entries = storage
        .list_report_entries(f.student_id, f.term_id)
        .await
        .expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].subject_code, "MATH");
    assert_eq!(entries[0].credit_hours, 4);
    assert_eq!(entries[0].weight, 2.0);

    assert_eq!(
        storage.max_recorded_score(exam.id).await.expect("max"),
        Some(40.0)
    );
    assert!(storage.delete_assessment(exam.id).await.expect("delete"));
    assert!(storage.get_grade(grade.id).await.expect("query").is_none());
}

#[tokio::test]
async fn test_mark_attendance_upserts() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;
    let classroom = storage
        .create_classroom(crate::models::academics::requests::CreateClassroomRequest {
            code: "1A".to_string(),
            name: "Form 1A".to_string(),
            grade_level_id: Some(f.grade_level_id),
            class_teacher_id: None,
            capacity: 40,
        })
        .await
        .expect("classroom");

    let mark = |status| MarkAttendanceRequest {
        classroom_id: classroom.id,
        date: date(2025, 2, 3),
        entries: vec![AttendanceEntry {
            student_id: f.student_id,
            status,
            notes: None,
        }],
    };

    let first = storage
        .mark_attendance(mark(AttendanceStatus::Absent), f.admin_id)
        .await
        .expect("mark");
    assert_eq!((first.created, first.updated), (1, 0));

    let second = storage
        .mark_attendance(mark(AttendanceStatus::Late), f.admin_id)
        .await
        .expect("mark");
    assert_eq!((second.created, second.updated), (0, 1));

    let counts = storage
        .count_attendance(AttendanceFilter {
            student_id: Some(f.student_id),
            ..Default::default()
        })
        .await
        .expect("counts");
    assert_eq!(counts.total(), 1);
    assert_eq!(counts.late, 1);
}

#[tokio::test]
async fn test_invoice_payments_move_status() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;

    let detail = storage
        .create_invoice(
            CreateInvoiceRequest {
                student_id: f.student_id,
                term_id: f.term_id,
                due_date: None,
                notes: None,
                lines: vec![
                    InvoiceLineInput {
                        description: "Tuition".to_string(),
                        amount_cents: 30_000,
                        fee_structure_id: None,
                    },
                    InvoiceLineInput {
                        description: "Sports".to_string(),
                        amount_cents: 5_000,
                        fee_structure_id: None,
                    },
                ],
            },
            f.admin_id,
        )
        .await
        .expect("invoice");
    let invoice = detail.invoice;
    assert_eq!(invoice.invoice_number, format!("INV-{:06}", invoice.id));
    assert_eq!(invoice.total_cents, 35_000);
    assert_eq!(detail.lines.len(), 2);

    let payment = |amount| NewPayment {
        invoice_id: invoice.id,
        amount_cents: amount,
        method: PaymentMethod::Cash,
        reference: None,
        transaction_id: None,
        paid_on: date(2025, 2, 1),
        received_by: Some(f.admin_id),
    };

    let first = storage.record_payment(payment(10_000)).await.expect("payment");
    assert_eq!(first.receipt_number, format!("RCT{:06}", first.id));
    let partial = storage.get_invoice(invoice.id).await.expect("query").expect("exists");
    assert_eq!(partial.status, InvoiceStatus::Partial);
    assert_eq!(partial.outstanding_cents, 25_000);

    let err = storage
        .record_payment(payment(25_001))
        .await
        .expect_err("overpayment");
    assert!(matches!(err, SchoolError::Validation(_)));

    storage.record_payment(payment(25_000)).await.expect("payment");
    let paid = storage.get_invoice(invoice.id).await.expect("query").expect("exists");
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert_eq!(paid.outstanding_cents, 0);

    let err = storage.cancel_invoice(invoice.id).await.expect_err("has payments");
    assert!(matches!(err, SchoolError::Validation(_)));

    let summary = storage.fee_summary(Some(f.term_id)).await.expect("summary");
    assert_eq!(summary.invoiced_cents, 35_000);
    assert_eq!(summary.collected_cents, 35_000);
    assert_eq!(summary.outstanding_cents, 0);
}

#[tokio::test]
async fn test_concurrent_payments_cannot_overpay() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;
    let invoice = storage
        .create_invoice(
            CreateInvoiceRequest {
                student_id: f.student_id,
                term_id: f.term_id,
                due_date: None,
                notes: None,
                lines: vec![InvoiceLineInput {
                    description: "Boarding".to_string(),
                    amount_cents: 10_000,
                    fee_structure_id: None,
                }],
            },
            f.admin_id,
        )
        .await
        .expect("invoice")
        .invoice;

    let payment = || NewPayment {
        invoice_id: invoice.id,
        amount_cents: 6_000,
        method: PaymentMethod::BankTransfer,
        reference: None,
        transaction_id: None,
        paid_on: date(2025, 2, 3),
        received_by: Some(f.admin_id),
    };
    let (a, b) = tokio::join!(
        storage.record_payment(payment()),
        storage.record_payment(payment()),
    );
    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);

    let after = storage.get_invoice(invoice.id).await.expect("query").expect("exists");
    assert_eq!(after.status, InvoiceStatus::Partial);
    assert_eq!(after.outstanding_cents, 4_000);
    assert_eq!(storage.list_payments(invoice.id).await.expect("payments").len(), 1);
}

#[tokio::test]
async fn test_fee_summary_leaves_out_cancelled_invoices() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;
    let invoice = |amount_cents| CreateInvoiceRequest {
        student_id: f.student_id,
        term_id: f.term_id,
        due_date: None,
        notes: None,
        lines: vec![InvoiceLineInput {
            description: "Tuition".to_string(),
            amount_cents,
            fee_structure_id: None,
        }],
    };

    let kept = storage
        .create_invoice(invoice(20_000), f.admin_id)
        .await
        .expect("invoice")
        .invoice;
    let cancelled = storage
        .create_invoice(invoice(50_000), f.admin_id)
        .await
        .expect("invoice")
        .invoice;
    storage
        .record_payment(NewPayment {
            invoice_id: kept.id,
            amount_cents: 5_000,
            method: PaymentMethod::Cash,
            reference: None,
            transaction_id: None,
            paid_on: date(2025, 2, 1),
            received_by: Some(f.admin_id),
        })
        .await
        .expect("payment");
    storage
        .cancel_invoice(cancelled.id)
        .await
        .expect("cancel")
        .expect("exists");

    let summary = storage.fee_summary(Some(f.term_id)).await.expect("summary");
    assert_eq!(summary.invoice_count, 1);
    assert_eq!(summary.invoiced_cents, 20_000);
    assert_eq!(summary.collected_cents, 5_000);
    assert_eq!(summary.outstanding_cents, 15_000);
    let count = |status| {
        summary
            .by_status
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
    };
    assert_eq!(count(InvoiceStatus::Cancelled), Some(1));
    assert_eq!(count(InvoiceStatus::Partial), Some(1));
}

#[tokio::test]
async fn test_generate_invoices_skips_invoiced_students() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;
    let request = GenerateInvoicesRequest {
        grade_level_id: f.grade_level_id,
        term_id: f.term_id,
        due_date: None,
    };

    let err = storage
        .generate_invoices(request.clone(), f.admin_id)
        .await
        .expect_err("no fee structures");
    assert!(matches!(err, SchoolError::Validation(_)));

    for (fee_type, amount) in [(FeeType::Tuition, 40_000), (FeeType::Library, 1_500)] {
        storage
            .create_fee_structure(CreateFeeStructureRequest {
                grade_level_id: f.grade_level_id,
                term_id: f.term_id,
                fee_type,
                amount_cents: amount,
                description: None,
            })
            .await
            .expect("fee structure");
    }

    let first = storage
        .generate_invoices(request.clone(), f.admin_id)
        .await
        .expect("generate");
    assert_eq!((first.created, first.skipped), (1, 0));

    let second = storage
        .generate_invoices(request, f.admin_id)
        .await
        .expect("generate");
    assert_eq!((second.created, second.skipped), (0, 1));

    let invoice = storage
        .get_invoice_detail(1)
        .await
        .expect("query")
        .expect("exists");
    assert_eq!(invoice.invoice.total_cents, 41_500);
}

#[tokio::test]
async fn test_unread_counts_exclude_own_messages() {
    let storage = memory_storage().await;
    let alice = user(&storage, "alice01", UserRole::Teacher).await;
    let bob = user(&storage, "bobby01", UserRole::Parent).await;

    let thread = storage
        .create_thread(
            CreateThreadRequest {
                title: "Trip forms".to_string(),
                kind: ThreadKind::Direct,
                participant_ids: vec![bob.id],
                message: Some("Hello".to_string()),
            },
            alice.id,
        )
        .await
        .expect("thread");
    assert_eq!(thread.participant_ids, vec![alice.id, bob.id]);

    storage
        .send_message(thread.id, alice.id, "Second".to_string())
        .await
        .expect("message");

    let bobs = storage
        .list_threads_for_user(bob.id, 1, 10)
        .await
        .expect("threads");
    assert_eq!(bobs.items[0].unread_count, 2);

    let alices = storage
        .list_threads_for_user(alice.id, 1, 10)
        .await
        .expect("threads");
    assert_eq!(alices.items[0].unread_count, 0);

    assert!(!storage.is_thread_participant(thread.id, 9_999).await.expect("query"));
}

#[tokio::test]
async fn test_reply_right_after_mark_read_is_unread() {
    let storage = memory_storage().await;
    let alice = user(&storage, "alice01", UserRole::Teacher).await;
    let bob = user(&storage, "bobby01", UserRole::Parent).await;

    let thread = storage
        .create_thread(
            CreateThreadRequest {
                title: "Sports kit".to_string(),
                kind: ThreadKind::Direct,
                participant_ids: vec![bob.id],
                message: Some("Please bring boots".to_string()),
            },
            alice.id,
        )
        .await
        .expect("thread");

    assert!(storage.mark_thread_read(thread.id, bob.id).await.expect("marked"));
    let bobs = storage.list_threads_for_user(bob.id, 1, 10).await.expect("threads");
    assert_eq!(bobs.items[0].unread_count, 0);

    // Same second as the read mark.
    storage
        .send_message(thread.id, alice.id, "And shin pads".to_string())
        .await
        .expect("message");
    let bobs = storage.list_threads_for_user(bob.id, 1, 10).await.expect("threads");
    assert_eq!(bobs.items[0].unread_count, 1);

    // Bob's own reply never counts for him; it does for Alice.
    storage
        .send_message(thread.id, bob.id, "Noted".to_string())
        .await
        .expect("message");
    let bobs = storage.list_threads_for_user(bob.id, 1, 10).await.expect("threads");
    assert_eq!(bobs.items[0].unread_count, 1);
    let alices = storage.list_threads_for_user(alice.id, 1, 10).await.expect("threads");
    assert_eq!(alices.items[0].unread_count, 1);
}

#[tokio::test]
async fn test_same_title_posts_at_once_get_distinct_slugs() {
    let storage = memory_storage().await;
    let author = user(&storage, "editor1", UserRole::Teacher).await;
    let post = || CreatePostRequest {
        title: "Sports Day".to_string(),
        content: "Body".to_string(),
        excerpt: None,
        category: PostCategory::Events,
    };

    let (a, b) = tokio::join!(
        create_with_free_slug(&storage, post(), author.id),
        create_with_free_slug(&storage, post(), author.id),
    );
    let mut slugs = vec![a.expect("first post").slug, b.expect("second post").slug];
    slugs.sort();
    assert_eq!(slugs, vec!["sports-day", "sports-day-2"]);

    let third = create_with_free_slug(&storage, post(), author.id)
        .await
        .expect("third post");
    assert_eq!(third.slug, "sports-day-3");
}

#[tokio::test]
async fn test_post_slugs_and_publication() {
    let storage = memory_storage().await;
    let author = user(&storage, "editor1", UserRole::Teacher).await;
    let post = |title: &str| CreatePostRequest {
        title: title.to_string(),
        content: "Body".to_string(),
        excerpt: None,
        category: PostCategory::News,
    };

    let first = storage
        .create_post(post("Sports Day"), "sports-day".to_string(), author.id)
        .await
        .expect("post");
    storage
        .create_post(post("Sports Day"), "sports-day-2".to_string(), author.id)
        .await
        .expect("post");
    storage
        .create_post(post("Other"), "sports-days".to_string(), author.id)
        .await
        .expect("post");

    let mut slugs = storage.list_slugs_like("sports-day").await.expect("slugs");
    slugs.sort();
    assert_eq!(slugs, vec!["sports-day", "sports-day-2"]);

    let published = storage
        .set_post_status(first.id, PostStatus::Published)
        .await
        .expect("publish")
        .expect("exists");
    let published_at = published.published_at.expect("published_at set");
    storage
        .set_post_status(first.id, PostStatus::Archived)
        .await
        .expect("archive");
    let again = storage
        .set_post_status(first.id, PostStatus::Published)
        .await
        .expect("publish")
        .expect("exists");
    assert_eq!(again.published_at, Some(published_at));

    let public = storage
        .list_posts(
            1,
            10,
            PostFilter {
                status: Some(PostStatus::Published),
                ..Default::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(public.pagination.total, 1);
}

#[tokio::test]
async fn test_stock_out_cannot_go_negative() {
    let storage = memory_storage().await;
    let clerk = user(&storage, "clerk01", UserRole::Staff).await;
    let item = storage
        .create_item(CreateItemRequest {
            item_code: "CHALK-01".to_string(),
            name: "Chalk".to_string(),
            category: ItemCategory::Stationery,
            description: None,
            unit_price_cents: Some(150),
            current_stock: 10,
            minimum_stock: 5,
            location: None,
        })
        .await
        .expect("item");

    let movement = |kind, quantity| StockMovementRequest {
        kind,
        quantity,
        reference: None,
        notes: None,
    };

    let out = storage
        .record_stock_movement(item.id, movement(TransactionKind::Out, 6), clerk.id)
        .await
        .expect("movement");
    assert_eq!(out.item.current_stock, 4);
    assert_eq!(out.transaction.stock_after, 4);
    assert!(out.item.is_low_stock);

    let err = storage
        .record_stock_movement(item.id, movement(TransactionKind::Out, 5), clerk.id)
        .await
        .expect_err("insufficient stock");
    assert!(matches!(err, SchoolError::Validation(_)));
    let unchanged = storage.get_item(item.id).await.expect("query").expect("exists");
    assert_eq!(unchanged.current_stock, 4);

    let low = storage
        .list_items(
            1,
            10,
            ItemFilter {
                low_stock: true,
                ..Default::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(low.pagination.total, 1);

    assert!(storage.soft_delete_item(item.id).await.expect("delete"));
    assert!(storage.get_item(item.id).await.expect("query").is_none());
}

#[tokio::test]
async fn test_concurrent_stock_outs_never_oversell() {
    let storage = memory_storage().await;
    let clerk = user(&storage, "clerk01", UserRole::Staff).await;
    let item = storage
        .create_item(CreateItemRequest {
            item_code: "INK-02".to_string(),
            name: "Printer ink".to_string(),
            category: ItemCategory::Stationery,
            description: None,
            unit_price_cents: None,
            current_stock: 5,
            minimum_stock: 0,
            location: None,
        })
        .await
        .expect("item");

    let take_four = || StockMovementRequest {
        kind: TransactionKind::Out,
        quantity: 4,
        reference: None,
        notes: None,
    };
    let (a, b) = tokio::join!(
        storage.record_stock_movement(item.id, take_four(), clerk.id),
        storage.record_stock_movement(item.id, take_four(), clerk.id),
    );
    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);

    let after = storage.get_item(item.id).await.expect("query").expect("exists");
    assert_eq!(after.current_stock, 1);
    let history = storage
        .list_item_transactions(item.id, 1, 10)
        .await
        .expect("history");
    assert_eq!(history.pagination.total, 1);
}

#[tokio::test]
async fn test_leave_decided_only_once() {
    let storage = memory_storage().await;
    let admin = user(&storage, "admin01", UserRole::Admin).await;
    let employee = storage
        .create_employee(CreateEmployeeRequest {
            employee_number: "EMP-001".to_string(),
            user_id: None,
            first_name: "Nyasha".to_string(),
            last_name: "Chikore".to_string(),
            department: "Administration".to_string(),
            position: "Bursar".to_string(),
            salary_cents: None,
            hire_date: date(2020, 1, 6),
        })
        .await
        .expect("employee");
    let leave = storage
        .create_leave_request(CreateLeaveRequest {
            employee_id: employee.id,
            start_date: date(2025, 3, 3),
            end_date: date(2025, 3, 7),
            reason: "Family".to_string(),
        })
        .await
        .expect("leave");
    assert_eq!(leave.days, 5);

    let approved = storage
        .decide_leave_request(leave.id, LeaveStatus::Approved, admin.id)
        .await
        .expect("decide")
        .expect("exists");
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.decided_by, Some(admin.id));

    let err = storage
        .decide_leave_request(leave.id, LeaveStatus::Rejected, admin.id)
        .await
        .expect_err("already decided");
    assert!(matches!(err, SchoolError::Validation(_)));
    assert!(
        storage
            .decide_leave_request(9_999, LeaveStatus::Approved, admin.id)
            .await
            .expect("query")
            .is_none()
    );

    assert!(storage.terminate_employee(employee.id).await.expect("terminate"));
    assert!(!storage.terminate_employee(employee.id).await.expect("terminate"));
}

fn application(grade_level_id: i64, first_name: &str) -> SubmitApplicationRequest {
    SubmitApplicationRequest {
        first_name: first_name.to_string(),
        last_name: "Ncube".to_string(),
        date_of_birth: date(2013, 6, 2),
        gender: Gender::Female,
        grade_level_id,
        guardian_name: "Sipho Ncube".to_string(),
        guardian_phone: "+263771234567".to_string(),
        guardian_email: None,
        address: None,
        previous_school: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_application_moves_through_review_to_enrollment() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;

    let submitted = storage
        .submit_application(application(f.grade_level_id, "Rudo"))
        .await
        .expect("submitted");
    assert_eq!(submitted.status, ApplicationStatus::New);
    assert_eq!(submitted.reviewed_by, None);

    let err = storage
        .enroll_application(
            submitted.id,
            EnrollApplicationRequest {
                user_id: f.admin_id,
                admission_number: "ADM-0002".to_string(),
                classroom_id: None,
                enrollment_date: None,
                is_boarder: false,
            },
        )
        .await
        .expect_err("not approved yet");
    assert!(matches!(err, SchoolError::Validation(_)));

    let reviewing = storage
        .set_application_status(submitted.id, ApplicationStatus::Review, f.admin_id)
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(reviewing.status, ApplicationStatus::Review);
    assert_eq!(reviewing.reviewed_by, Some(f.admin_id));

    let approved = storage
        .set_application_status(submitted.id, ApplicationStatus::Approved, f.admin_id)
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(approved.status, ApplicationStatus::Approved);

    let account = user(&storage, "rudo2026", UserRole::Student).await;
    let enrolled = storage
        .enroll_application(
            submitted.id,
            EnrollApplicationRequest {
                user_id: account.id,
                admission_number: "ADM-0002".to_string(),
                classroom_id: None,
                enrollment_date: Some(date(2026, 1, 12)),
                is_boarder: true,
            },
        )
        .await
        .expect("enrolled")
        .expect("exists");
    assert_eq!(enrolled.application.status, ApplicationStatus::Enrolled);
    assert_eq!(enrolled.student.admission_number, "ADM-0002");
    assert_eq!(enrolled.student.grade_level_id, f.grade_level_id);
    assert_eq!(enrolled.student.gender, Some(Gender::Female));
    assert_eq!(enrolled.student.date_of_birth, Some(date(2013, 6, 2)));
    assert!(enrolled.student.is_boarder);
    assert_eq!(enrolled.enrollment.student_id, Some(enrolled.student.id));

    let detail = storage
        .get_application_detail(submitted.id)
        .await
        .expect("query")
        .expect("exists");
    assert_eq!(
        detail.enrollment.map(|e| e.admission_number).as_deref(),
        Some("ADM-0002")
    );

    let err = storage
        .set_application_status(submitted.id, ApplicationStatus::Rejected, f.admin_id)
        .await
        .expect_err("enrolled is final");
    assert!(matches!(err, SchoolError::Validation(_)));
}

#[tokio::test]
async fn test_enrollment_rolls_back_on_taken_admission_number() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;

    let submitted = storage
        .submit_application(application(f.grade_level_id, "Tatenda"))
        .await
        .expect("submitted");
    storage
        .set_application_status(submitted.id, ApplicationStatus::Approved, f.admin_id)
        .await
        .expect("update")
        .expect("exists");

    let account = user(&storage, "tatenda01", UserRole::Student).await;
    // The fixture student already holds ADM-0001.
    let err = storage
        .enroll_application(
            submitted.id,
            EnrollApplicationRequest {
                user_id: account.id,
                admission_number: "ADM-0001".to_string(),
                classroom_id: None,
                enrollment_date: None,
                is_boarder: false,
            },
        )
        .await
        .expect_err("duplicate admission number");
    assert!(matches!(err, SchoolError::Conflict(_)));

    let still = storage
        .get_application(submitted.id)
        .await
        .expect("query")
        .expect("exists");
    assert_eq!(still.status, ApplicationStatus::Approved);
    assert!(storage.get_enrollment(submitted.id).await.expect("query").is_none());
    assert!(
        storage
            .get_student_by_user_id(account.id)
            .await
            .expect("query")
            .is_none()
    );
}

#[tokio::test]
async fn test_application_queue_filters() {
    let storage = memory_storage().await;
    let f = fixture(&storage).await;

    let first = storage
        .submit_application(application(f.grade_level_id, "Rudo"))
        .await
        .expect("submitted");
    storage
        .submit_application(application(f.grade_level_id, "Farai"))
        .await
        .expect("submitted");
    storage
        .set_application_status(first.id, ApplicationStatus::Rejected, f.admin_id)
        .await
        .expect("update")
        .expect("exists");

    let fresh = storage
        .list_applications(
            1,
            10,
            ApplicationFilter {
                status: Some(ApplicationStatus::New),
                ..Default::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(fresh.pagination.total, 1);
    assert_eq!(fresh.items[0].first_name, "Farai");

    let by_guardian = storage
        .list_applications(
            1,
            10,
            ApplicationFilter {
                search: Some("sipho".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(by_guardian.pagination.total, 2);
    assert_eq!(by_guardian.items[0].id, first.id);

    assert!(
        storage
            .set_application_status(9_999, ApplicationStatus::Review, f.admin_id)
            .await
            .expect("query")
            .is_none()
    );
}
