// src/infra/session.rs — In-memory session record
//
// Holds who is logged in and which CV / analysis result the user is working
// with. Never persisted; a fresh process starts with an empty session.

use serde::{Deserialize, Serialize};

/// User id sent to the server when nobody is logged in.
pub const ANONYMOUS_USER_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Session state. Treated as a value: every change produces a new session
/// that replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub selected_cv_id: Option<i64>,
    pub selected_result_id: Option<i64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id to send with requests: the logged-in user's, or 0.
    pub fn user_id(&self) -> i64 {
        self.user.as_ref().map(|u| u.id).unwrap_or(ANONYMOUS_USER_ID)
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn with_user(&self, user: User) -> Self {
        Self {
            user: Some(user),
            ..self.clone()
        }
    }

    pub fn without_user(&self) -> Self {
        Self {
            user: None,
            ..self.clone()
        }
    }

    pub fn with_cv(&self, cv_id: i64) -> Self {
        Self {
            selected_cv_id: Some(cv_id),
            ..self.clone()
        }
    }

    pub fn with_result(&self, result_id: i64) -> Self {
        Self {
            selected_result_id: Some(result_id),
            ..self.clone()
        }
    }
}
