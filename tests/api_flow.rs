use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use sea_orm::SqlxSqliteConnector;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use serde_json::{Value, json};

use regis_school::cache::{MokaCacheWrapper, ObjectCache};
use regis_school::models::AppStartTime;
use regis_school::models::academics::requests::{CreateGradeLevelRequest, CreateTermRequest};
use regis_school::models::blog::{
    entities::{PostCategory, PostStatus},
    requests::CreatePostRequest,
};
use regis_school::models::fees::requests::{CreateInvoiceRequest, InvoiceLineInput};
use regis_school::models::parents::{entities::ParentRelationship, requests::CreateParentRequest};
use regis_school::models::students::requests::CreateStudentRequest;
use regis_school::models::users::{entities::UserRole, requests::CreateUserRequest};
use regis_school::routes;
use regis_school::storage::Storage;
use regis_school::storage::sea_orm_storage::SeaOrmStorage;
use regis_school::utils::password::hash_password;
use regis_school::utils::{json_error_handler, query_error_handler};

const PASSWORD: &str = "Passw0rd!";

async fn memory_storage() -> Arc<dyn Storage> {
    let opt = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opt)
        .await
        .expect("in-memory sqlite");
    let storage = SeaOrmStorage::with_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        .await
        .expect("migrations run");
    Arc::new(storage)
}

async fn seed_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> i64 {
    let user = storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@regis.test"),
            password: hash_password(PASSWORD).expect("hashable"),
            role,
            first_name: username.to_string(),
            last_name: "Test".to_string(),
            phone: None,
        })
        .await
        .expect("user created");
    user.id
}

fn day(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

async fn seed_grade_level(storage: &Arc<dyn Storage>) -> i64 {
    storage
        .create_grade_level(CreateGradeLevelRequest {
            name: "Form 2".to_string(),
            level: 2,
            description: None,
        })
        .await
        .expect("grade level")
        .id
}

/// Student account plus profile; returns the profile id.
async fn seed_student(
    storage: &Arc<dyn Storage>,
    username: &str,
    admission_number: &str,
    grade_level_id: i64,
) -> i64 {
    let user_id = seed_user(storage, username, UserRole::Student).await;
    storage
        .create_student(CreateStudentRequest {
            user_id,
            admission_number: admission_number.to_string(),
            grade_level_id,
            classroom_id: None,
            gender: None,
            date_of_birth: None,
            enrollment_date: Some(day(2026, 1, 12)),
            is_boarder: false,
            medical_notes: None,
        })
        .await
        .expect("student")
        .id
}

/// Parent account plus profile; returns the profile id.
async fn seed_parent(storage: &Arc<dyn Storage>, username: &str) -> i64 {
    let user_id = seed_user(storage, username, UserRole::Parent).await;
    storage
        .create_parent(CreateParentRequest {
            user_id,
            relationship: ParentRelationship::Mother,
            phone: None,
            address: None,
            occupation: None,
            is_primary_contact: true,
        })
        .await
        .expect("parent")
        .id
}

macro_rules! school_app {
    ($storage:expr) => {{
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(1000, 60));
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(routes::configure_routes),
        )
        .await
    }};
}

macro_rules! login {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": $username, "password": PASSWORD }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["data"]["access_token"]
            .as_str()
            .expect("access token in login response")
            .to_string()
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_health_is_public() {
    let storage = memory_storage().await;
    let app = school_app!(storage);

    let req = test::TestRequest::get().uri("/api/v1/system/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_protected_routes_need_a_token() {
    let storage = memory_storage().await;
    let app = school_app!(storage);

    let req = test::TestRequest::get().uri("/api/v1/students").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/students")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    let storage = memory_storage().await;
    seed_user(&storage, "bursar", UserRole::Staff).await;
    let app = school_app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "bursar", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_roles_gate_admin_routes() {
    let storage = memory_storage().await;
    seed_user(&storage, "principal", UserRole::Admin).await;
    seed_user(&storage, "tariro", UserRole::Student).await;
    let app = school_app!(storage);

    let student_token = login!(app, "tariro");
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let admin_token = login!(app, "principal");
    let req = test::TestRequest::get()
        .uri("/api/v1/users?page=1&size=1")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["pagination"]["total"], 2);
    assert_eq!(body["data"]["pagination"]["total_pages"], 2);
}

#[actix_web::test]
async fn test_me_returns_the_logged_in_user() {
    let storage = memory_storage().await;
    seed_user(&storage, "mrs.moyo", UserRole::Teacher).await;
    let app = school_app!(storage);

    let token = login!(app, "mrs.moyo");
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["username"], "mrs.moyo");
    assert_eq!(body["data"]["user"]["role"], "teacher");
}

#[actix_web::test]
async fn test_validation_and_missing_records() {
    let storage = memory_storage().await;
    let student_user = seed_user(&storage, "chipo", UserRole::Student).await;
    seed_user(&storage, "principal", UserRole::Admin).await;
    let app = school_app!(storage);
    let token = login!(app, "principal");

    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&token))
        .set_json(json!({
            "user_id": student_user,
            "admission_number": "   ",
            "grade_level_id": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/students/9999")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);

    let req = test::TestRequest::post()
        .uri("/api/v1/terms")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Term 1",
            "academic_year": "2026",
            "start_date": "2026-04-30",
            "end_date": "2026-01-10"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2500);
}

#[actix_web::test]
async fn test_news_pages_render_published_posts() {
    let storage = memory_storage().await;
    let author = seed_user(&storage, "editor", UserRole::Teacher).await;
    let post = storage
        .create_post(
            CreatePostRequest {
                title: "Prize giving day".to_string(),
                content: "Parents are welcome.\n\nThe ceremony starts at ten.".to_string(),
                excerpt: None,
                category: PostCategory::Events,
            },
            "prize-giving-day".to_string(),
            author,
        )
        .await
        .expect("post created");
    storage
        .create_post(
            CreatePostRequest {
                title: "Unreleased draft".to_string(),
                content: "Not yet".to_string(),
                excerpt: None,
                category: PostCategory::News,
            },
            "unreleased-draft".to_string(),
            author,
        )
        .await
        .expect("draft created");
    storage
        .set_post_status(post.id, PostStatus::Published)
        .await
        .expect("published");
    let app = school_app!(storage);

    let req = test::TestRequest::get().uri("/news").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8");
    assert!(html.contains("Prize giving day"));
    assert!(!html.contains("Unreleased draft"));

    let req = test::TestRequest::get().uri("/news/prize-giving-day").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8");
    assert!(html.contains("The ceremony starts at ten."));

    let req = test::TestRequest::get().uri("/news/unreleased-draft").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/v1/public/posts/prize-giving-day")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["slug"], "prize-giving-day");
}

#[actix_web::test]
async fn test_parent_without_children_sees_no_invoices() {
    let storage = memory_storage().await;
    seed_parent(&storage, "mai.rudo").await;
    let app = school_app!(storage);
    let token = login!(app, "mai.rudo");

    let req = test::TestRequest::get()
        .uri("/api/v1/fees/invoices?page=2&size=5")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["data"]["pagination"]["page"], 2);
    assert_eq!(body["data"]["pagination"]["page_size"], 5);
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn test_student_records_are_private() {
    let storage = memory_storage().await;
    seed_user(&storage, "principal", UserRole::Admin).await;
    let grade = seed_grade_level(&storage).await;
    let tariro = seed_student(&storage, "tariro", "ADM-0101", grade).await;
    let chipo = seed_student(&storage, "chipo", "ADM-0102", grade).await;
    let parent = seed_parent(&storage, "mai.tariro").await;
    let app = school_app!(storage);

    let student_token = login!(app, "tariro");
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{tariro}"))
        .insert_header(bearer(&student_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{chipo}"))
        .insert_header(bearer(&student_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let parent_token = login!(app, "mai.tariro");
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{tariro}"))
        .insert_header(bearer(&parent_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let admin_token = login!(app, "principal");
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/parents/{parent}/students"))
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "student_id": tariro }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{tariro}"))
        .insert_header(bearer(&parent_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{chipo}"))
        .insert_header(bearer(&parent_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_parent_links_are_unique() {
    let storage = memory_storage().await;
    seed_user(&storage, "principal", UserRole::Admin).await;
    let grade = seed_grade_level(&storage).await;
    let tariro = seed_student(&storage, "tariro", "ADM-0101", grade).await;
    let chipo = seed_student(&storage, "chipo", "ADM-0102", grade).await;
    let parent = seed_parent(&storage, "mai.tariro").await;
    let app = school_app!(storage);
    let token = login!(app, "principal");

    let link = || {
        test::TestRequest::post()
            .uri(&format!("/api/v1/parents/{parent}/students"))
            .insert_header(bearer(&token))
            .set_json(json!({ "student_id": tariro }))
            .to_request()
    };
    assert_eq!(test::call_service(&app, link()).await.status(), StatusCode::CREATED);
    let resp = test::call_service(&app, link()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1009);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/parents/{parent}/students/{chipo}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/parents/{parent}/students/{tariro}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_generating_invoices_needs_fee_structures() {
    let storage = memory_storage().await;
    seed_user(&storage, "bursar", UserRole::Staff).await;
    let grade = seed_grade_level(&storage).await;
    seed_student(&storage, "tariro", "ADM-0101", grade).await;
    let term = storage
        .create_term(CreateTermRequest {
            name: "Term 1".to_string(),
            academic_year: "2026".to_string(),
            start_date: day(2026, 1, 12),
            end_date: day(2026, 4, 2),
        })
        .await
        .expect("term");
    let app = school_app!(storage);
    let token = login!(app, "bursar");

    let req = test::TestRequest::post()
        .uri("/api/v1/fees/invoices/generate")
        .insert_header(bearer(&token))
        .set_json(json!({ "grade_level_id": grade, "term_id": term.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 6000);
}

#[actix_web::test]
async fn test_staff_keep_invoices_of_removed_students() {
    let storage = memory_storage().await;
    let bursar = seed_user(&storage, "bursar", UserRole::Staff).await;
    let grade = seed_grade_level(&storage).await;
    let student = seed_student(&storage, "tariro", "ADM-0101", grade).await;
    let term = storage
        .create_term(CreateTermRequest {
            name: "Term 1".to_string(),
            academic_year: "2026".to_string(),
            start_date: day(2026, 1, 12),
            end_date: day(2026, 4, 2),
        })
        .await
        .expect("term");
    let invoice = storage
        .create_invoice(
            CreateInvoiceRequest {
                student_id: student,
                term_id: term.id,
                due_date: None,
                notes: None,
                lines: vec![InvoiceLineInput {
                    description: "Tuition".to_string(),
                    amount_cents: 45_000,
                    fee_structure_id: None,
                }],
            },
            bursar,
        )
        .await
        .expect("invoice")
        .invoice;
    assert!(storage.soft_delete_student(student).await.expect("deleted"));
    let app = school_app!(storage);

    let bursar_token = login!(app, "bursar");
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/fees/invoices/{}", invoice.id))
        .insert_header(bearer(&bursar_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["invoice"]["invoice_number"], invoice.invoice_number);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/fees/invoices/{}/payments", invoice.id))
        .insert_header(bearer(&bursar_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let student_token = login!(app, "tariro");
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/fees/invoices/{}", invoice.id))
        .insert_header(bearer(&student_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admission_from_public_form_to_enrollment() {
    let storage = memory_storage().await;
    seed_user(&storage, "principal", UserRole::Admin).await;
    seed_user(&storage, "registrar", UserRole::Staff).await;
    let account = seed_user(&storage, "rudo2026", UserRole::Student).await;
    let grade = seed_grade_level(&storage).await;
    let app = school_app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/public/admissions")
        .set_json(json!({
            "first_name": "Rudo",
            "last_name": "Ncube",
            "date_of_birth": "2013-06-02",
            "gender": "female",
            "grade_level_id": grade,
            "guardian_name": "Sipho Ncube",
            "guardian_phone": "+263771234567",
            "guardian_email": "sipho@example.com"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "new");
    let id = body["data"]["id"].as_i64().expect("application id");

    let req = test::TestRequest::post()
        .uri("/api/v1/public/admissions")
        .set_json(json!({
            "first_name": "Rudo",
            "last_name": "Ncube",
            "date_of_birth": "2013-06-02",
            "gender": "female",
            "grade_level_id": grade,
            "guardian_name": "   ",
            "guardian_phone": "+263771234567"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 11001);

    let registrar = login!(app, "registrar");
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admissions/{id}/review"))
        .insert_header(bearer(&registrar))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admissions/{id}/approve"))
        .insert_header(bearer(&registrar))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let principal = login!(app, "principal");
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admissions/{id}/approve"))
        .insert_header(bearer(&principal))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "approved");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admissions/{id}/enroll"))
        .insert_header(bearer(&principal))
        .set_json(json!({ "user_id": account, "admission_number": " ADM-2026-001 " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["student"]["admission_number"], "ADM-2026-001");
    assert_eq!(body["data"]["application"]["status"], "enrolled");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admissions/{id}/reject"))
        .insert_header(bearer(&principal))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/admissions?status=enrolled")
        .insert_header(bearer(&registrar))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
}
