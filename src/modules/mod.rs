pub mod auth;
pub mod exports;
pub mod students;
pub mod teachers;
