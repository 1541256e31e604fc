/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - token validator, authority mapper, dispatcher (which owns the course store)
 * - Cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::repos::CourseStore;
use crate::services::{
    auth::TokenValidator, authority_mapper::AuthorityMapper, dispatcher::Dispatcher,
};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn TokenValidator>,
    pub mapper: AuthorityMapper,
    pub dispatcher: Dispatcher,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth.name())
            .field("mapper", &self.mapper)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl AppState {
    pub fn new(
        auth: Arc<dyn TokenValidator>,
        mapper: AuthorityMapper,
        store: Arc<dyn CourseStore>,
    ) -> Self {
        Self {
            auth,
            mapper,
            dispatcher: Dispatcher::new(store),
        }
    }
}
