pub mod course_store;

pub use course_store::{CourseStore, InMemoryCourseStore};
