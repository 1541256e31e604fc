/*
 * Responsibility
 * - Course storage interface the dispatcher depends on (next_id / append / snapshot)
 * - In-memory implementation shared by all requests through AppState
 *
 * Concurrency
 * - id counter: atomic increment-and-read, never hands out the same id twice
 * - collection: RwLock; snapshots share the read lock, appends take the write lock
 */
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::RwLock;

use crate::domain::course::{Course, NewCourse};

pub trait CourseStore: Send + Sync {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Reserve the next id. Strictly increasing for the lifetime of the store.
    fn next_id(&self) -> i64;

    // Append a course whose id came from `next_id`. Returns the stored value.
    fn append(&self, course: Course) -> Course;

    // Owned copy of the collection in insertion order.
    fn snapshot(&self) -> Vec<Course>;

    fn create(&self, new_course: NewCourse) -> Course {
        let id = self.next_id();
        self.append(new_course.into_course(id))
    }
}

#[derive(Debug)]
pub struct InMemoryCourseStore {
    next_id: AtomicI64,
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            courses: RwLock::new(Vec::new()),
        }
    }

    /// Store pre-populated with the demo course (id 1).
    pub fn with_demo_course() -> Self {
        let store = Self::new();
        store.create(NewCourse::new(
            "Introduction to Java",
            "Java language basics and object-oriented programming.",
        ));
        store
    }
}

impl Default for InMemoryCourseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseStore for InMemoryCourseStore {
    fn backend_name(&self) -> &'static str {
        "in-memory"
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn append(&self, course: Course) -> Course {
        self.courses.write().push(course.clone());
        course
    }

    fn snapshot(&self) -> Vec<Course> {
        self.courses.read().clone()
    }

    // Id allocation and push happen under the same write lock, so insertion
    // order and id order never disagree.
    fn create(&self, new_course: NewCourse) -> Course {
        let mut courses = self.courses.write();
        let course = new_course.into_course(self.next_id());
        courses.push(course.clone());
        course
    }
}
