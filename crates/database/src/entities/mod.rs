pub mod course;

pub use course::Entity as Courses;
