//! Grade levels, classrooms, terms and subjects.
//!
//! Each resource lives in its own file as an `impl AcademicsService` block.

mod classrooms;
mod grade_levels;
mod subjects;
mod terms;

crate::services::lazy_service!(AcademicsService);
