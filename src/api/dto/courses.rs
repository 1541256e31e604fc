/*
 * Responsibility
 * - Course response DTO
 * - The create request has no DTO: the body is read leniently by NewCourse::from_body
 */
use serde::Serialize;

use crate::domain::course::Course;

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
        }
    }
}
