use serde::Serialize;

use crate::entities::User;
use crate::errors::CoreError;

use super::FetchPhase;

const PAGE: &str = "user directory";

/// View state of the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDirectory {
    phase: FetchPhase,
    users: Vec<User>,
    error: Option<String>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: FetchPhase::Idle,
            users: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The default current user: the first listed.
    #[must_use]
    pub fn first(&self) -> Option<&User> {
        self.users.first()
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    fn transition(&self, next: FetchPhase) -> Result<Self, CoreError> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::transition(PAGE, self.phase, next));
        }
        let mut state = self.clone();
        state.phase = next;
        Ok(state)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] while a load is outstanding.
    pub fn begin_load(&self) -> Result<Self, CoreError> {
        let mut state = self.transition(FetchPhase::Loading)?;
        state.error = None;
        Ok(state)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless loading.
    pub fn loaded(&self, users: Vec<User>) -> Result<Self, CoreError> {
        let mut state = self.transition(FetchPhase::Ready)?;
        state.users = users;
        Ok(state)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless loading.
    pub fn load_failed(&self, message: impl Into<String>) -> Result<Self, CoreError> {
        let mut state = self.transition(FetchPhase::Failed)?;
        state.error = Some(message.into());
        Ok(state)
    }

    /// Append a newly created user.
    #[must_use]
    pub fn user_created(&self, user: User) -> Self {
        let mut state = self.clone();
        state.users.push(user);
        state.error = None;
        state
    }

    /// Drop a deleted user from the list.
    #[must_use]
    pub fn user_deleted(&self, id: i64) -> Self {
        let mut state = self.clone();
        state.users.retain(|user| user.id != id);
        state.error = None;
        state
    }

    /// Record a failed create/delete. The list is kept.
    #[must_use]
    pub fn action_failed(&self, message: impl Into<String>) -> Self {
        let mut state = self.clone();
        state.error = Some(message.into());
        state
    }
}
