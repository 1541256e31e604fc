//! Role-gated dispatch.
//!
//! Every operation goes through [`Dispatcher::dispatch`], which evaluates the
//! route guard before the operation closure is even called. A denied request
//! never touches the store.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::course::{Course, NewCourse, PayloadError};
use crate::domain::principal::{Principal, SelfDescription};
use crate::repos::CourseStore;
use crate::services::route_guard::{self, Decision, Operation};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{subject}' may not {operation}")]
pub struct AccessDenied {
    pub operation: Operation,
    pub subject: String,
}

#[derive(Debug, Error)]
pub enum CreateCourseError {
    #[error(transparent)]
    Denied(#[from] AccessDenied),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn CourseStore>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    pub fn dispatch<T, F>(
        &self,
        principal: &Principal,
        operation: Operation,
        run: F,
    ) -> Result<T, AccessDenied>
    where
        F: FnOnce(&dyn CourseStore) -> T,
    {
        match route_guard::decide(operation, principal.authorities()) {
            Decision::Allow => Ok(run(self.store.as_ref())),
            Decision::Deny => {
                tracing::info!(
                    subject = principal.subject(),
                    %operation,
                    authorities = %principal.authorities(),
                    "access denied"
                );
                Err(AccessDenied {
                    operation,
                    subject: principal.subject().to_string(),
                })
            }
        }
    }

    pub fn list_courses(&self, principal: &Principal) -> Result<Vec<Course>, AccessDenied> {
        self.dispatch(principal, Operation::ListCourses, |store| store.snapshot())
    }

    /// `body` is whatever the transport managed to read. Both a read failure
    /// and a parse failure only surface once the caller is known to be allowed.
    pub fn create_course(
        &self,
        principal: &Principal,
        body: Result<&[u8], PayloadError>,
    ) -> Result<Course, CreateCourseError> {
        let course = self.dispatch(principal, Operation::CreateCourse, |store| {
            body.and_then(NewCourse::from_body)
                .map(|new_course| store.create(new_course))
        })??;

        tracing::info!(
            subject = principal.subject(),
            course_id = course.id,
            "course created"
        );
        Ok(course)
    }

    pub fn describe_self(&self, principal: &Principal) -> Result<SelfDescription, AccessDenied> {
        self.dispatch(principal, Operation::DescribeSelf, |_| principal.describe())
    }
}
