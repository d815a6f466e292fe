//! Application state shared by the handlers

use std::sync::Arc;

use crate::infrastructure::user::UserService;

/// Application state. The user service owns the only shared resource, the
/// document collection handle.
#[derive(Clone, Debug)]
pub struct AppState {
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn new(user_service: UserService) -> Self {
        Self {
            user_service: Arc::new(user_service),
        }
    }
}
