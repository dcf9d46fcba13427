pub mod academics;
pub mod admissions;
pub mod assessments;
pub mod attendance;
pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod fees;
pub mod hr;
pub mod inventory;
pub mod messaging;
pub mod parents;
pub mod students;
pub mod system;
pub mod teachers;
pub mod users;

pub use academics::configure_academics_routes;
pub use admissions::configure_admission_routes;
pub use assessments::configure_assessment_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use blog::configure_blog_routes;
pub use dashboard::configure_dashboard_routes;
pub use fees::configure_fee_routes;
pub use hr::configure_hr_routes;
pub use inventory::configure_inventory_routes;
pub use messaging::configure_messaging_routes;
pub use parents::configure_parent_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// Registers every API scope and the public news pages.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_academics_routes)
        .configure(configure_admission_routes)
        .configure(configure_student_routes)
        .configure(configure_teacher_routes)
        .configure(configure_parent_routes)
        .configure(configure_assessment_routes)
        .configure(configure_attendance_routes)
        .configure(configure_fee_routes)
        .configure(configure_messaging_routes)
        .configure(configure_blog_routes)
        .configure(configure_inventory_routes)
        .configure(configure_hr_routes)
        .configure(configure_dashboard_routes);
}
