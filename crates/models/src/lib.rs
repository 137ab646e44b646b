pub mod course;
pub mod validation;
