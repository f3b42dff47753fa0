use parley_types::models::UserId;

use crate::error::{Error, Result};
use crate::models::{DataStore, UserRow};

impl DataStore {
    /// Which user currently holds `token`, if any.
    pub fn resolve_token(&self, token: &str) -> Option<UserId> {
        self.users
            .iter()
            .find(|u| u.session_tokens.iter().any(|t| t == token))
            .map(|u| u.id)
    }

    /// Like [`DataStore::resolve_token`], but an unknown token is an `InvalidToken` error.
    pub fn authenticate(&self, token: &str) -> Result<UserId> {
        self.resolve_token(token).ok_or(Error::InvalidToken)
    }

    pub fn user_exists(&self, id: UserId) -> bool {
        self.user(id).is_some()
    }

    pub fn user(&self, id: UserId) -> Option<&UserRow> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn handle_of(&self, id: UserId) -> Option<&str> {
        self.user(id).map(|u| u.handle.as_str())
    }
}
