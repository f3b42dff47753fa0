use parley_types::models::{User, UserId};

use crate::error::{Error, Result};
use crate::models::{DataStore, UserRow};

pub const MIN_HANDLE_LEN: usize = 3;
pub const MAX_HANDLE_LEN: usize = 20;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 50;

impl DataStore {
    // -- Registration --

    /// Add a user and open their first session with `token`.
    /// The password must already be hashed.
    pub fn register_user(
        &mut self,
        email: &str,
        password_hash: &str,
        name_first: &str,
        name_last: &str,
        token: &str,
    ) -> Result<UserId> {
        validate_email(email)?;
        validate_name(name_first)?;
        validate_name(name_last)?;
        if self.user_by_email(email).is_some() {
            return Err(Error::EmailInUse);
        }

        let handle = self.generate_handle(name_first, name_last);
        let id = self.next_user_id();
        let is_global_owner = self.users.is_empty();

        self.users.push(UserRow {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name_first: name_first.to_string(),
            name_last: name_last.to_string(),
            handle,
            is_global_owner,
            session_tokens: vec![token.to_string()],
        });

        Ok(id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&UserRow> {
        self.users.iter().find(|u| u.email == email)
    }

    // -- Sessions --

    pub fn start_session(&mut self, user_id: UserId, token: &str) -> Result<()> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(Error::UnknownUser(user_id))?;
        user.session_tokens.push(token.to_string());
        Ok(())
    }

    /// Invalidate one session. The user's other sessions stay valid.
    pub fn end_session(&mut self, token: &str) -> Result<UserId> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.session_tokens.iter().any(|t| t == token))
            .ok_or(Error::InvalidToken)?;
        user.session_tokens.retain(|t| t != token);
        Ok(user.id)
    }

    // -- Profiles --

    /// Every registered user, in registration order.
    pub fn list_users(&self, token: &str) -> Result<Vec<User>> {
        self.authenticate(token)?;
        Ok(self.users.iter().map(UserRow::to_user).collect())
    }

    pub fn user_profile(&self, token: &str, user_id: UserId) -> Result<User> {
        self.authenticate(token)?;
        self.user(user_id)
            .map(UserRow::to_user)
            .ok_or(Error::UnknownUser(user_id))
    }

    /// Existing DM names keep the handle they were built from.
    pub fn set_handle(&mut self, token: &str, handle: &str) -> Result<()> {
        let user_id = self.authenticate(token)?;
        validate_handle(handle)?;
        if self.users.iter().any(|u| u.id != user_id && u.handle == handle) {
            return Err(Error::HandleInUse);
        }
        self.user_row_mut(user_id)?.handle = handle.to_string();
        Ok(())
    }

    pub fn set_email(&mut self, token: &str, email: &str) -> Result<()> {
        let user_id = self.authenticate(token)?;
        validate_email(email)?;
        if self.users.iter().any(|u| u.id != user_id && u.email == email) {
            return Err(Error::EmailInUse);
        }
        self.user_row_mut(user_id)?.email = email.to_string();
        Ok(())
    }

    pub fn set_name(&mut self, token: &str, name_first: &str, name_last: &str) -> Result<()> {
        let user_id = self.authenticate(token)?;
        validate_name(name_first)?;
        validate_name(name_last)?;
        let user = self.user_row_mut(user_id)?;
        user.name_first = name_first.to_string();
        user.name_last = name_last.to_string();
        Ok(())
    }

    fn user_row_mut(&mut self, user_id: UserId) -> Result<&mut UserRow> {
        self.users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(Error::UnknownUser(user_id))
    }

    fn handle_taken(&self, handle: &str) -> bool {
        self.users.iter().any(|u| u.handle == handle)
    }

    /// Lowercased alphanumerics of first + last name, cut to 20 chars. On a
    /// clash the smallest free integer suffix is appended: `abc`, `abc0`, `abc1`...
    fn generate_handle(&self, name_first: &str, name_last: &str) -> String {
        let mut base: String = name_first
            .chars()
            .chain(name_last.chars())
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .take(MAX_HANDLE_LEN)
            .collect();
        if base.is_empty() {
            base.push_str("user");
        }

        if !self.handle_taken(&base) {
            return base;
        }

        let mut n: u64 = 0;
        loop {
            let candidate = format!("{base}{n}");
            if !self.handle_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// `local@domain.tld`, no whitespace, no empty labels.
pub fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid { Ok(()) } else { Err(Error::InvalidEmail) }
}

pub fn validate_handle(handle: &str) -> Result<()> {
    let len = handle.chars().count();
    if !(MIN_HANDLE_LEN..=MAX_HANDLE_LEN).contains(&len)
        || !handle.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(Error::InvalidHandle);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(Error::InvalidName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(data: &mut DataStore, email: &str, first: &str, last: &str) -> UserId {
        data.register_user(email, "hash", first, last, &format!("tok-{email}"))
            .unwrap()
    }

    #[test]
    fn first_user_is_global_owner() {
        let mut data = DataStore::default();
        let a = register(&mut data, "a@example.com", "Amy", "Lee");
        let b = register(&mut data, "b@example.com", "Bob", "Ray");
        assert!(data.user(a).unwrap().is_global_owner);
        assert!(!data.user(b).unwrap().is_global_owner);
    }

    #[test]
    fn handles_are_lowercase_alphanumeric_and_truncated() {
        let mut data = DataStore::default();
        let a = register(&mut data, "a@example.com", "Jean-Luc", "O'Picard");
        let b = register(&mut data, "b@example.com", "Abcdefghijklmno", "Pqrstuvwxyz");
        assert_eq!(data.handle_of(a), Some("jeanlucopicard"));
        assert_eq!(data.handle_of(b), Some("abcdefghijklmnopqrst"));
    }

    #[test]
    fn handle_clashes_get_counting_suffix() {
        let mut data = DataStore::default();
        let ids: Vec<_> = (0..3)
            .map(|i| register(&mut data, &format!("u{i}@example.com"), "Amy", "Lee"))
            .collect();
        let handles: Vec<_> = ids.iter().map(|id| data.handle_of(*id).unwrap()).collect();
        assert_eq!(handles, vec!["amylee", "amylee0", "amylee1"]);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut data = DataStore::default();
        register(&mut data, "a@example.com", "Amy", "Lee");
        let res = data.register_user("a@example.com", "hash", "Amy", "Two", "t2");
        assert_eq!(res, Err(Error::EmailInUse));
        assert_eq!(data.users.len(), 1);
    }

    #[test]
    fn registration_validates_input() {
        let mut data = DataStore::default();
        assert_eq!(
            data.register_user("not-an-email", "hash", "Amy", "Lee", "t"),
            Err(Error::InvalidEmail)
        );
        assert_eq!(
            data.register_user("a@example.com", "hash", "", "Lee", "t"),
            Err(Error::InvalidName)
        );
        assert_eq!(
            data.register_user("a@example.com", "hash", "Amy", &"x".repeat(51), "t"),
            Err(Error::InvalidName)
        );
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("amy@example.com").is_ok());
        assert!(validate_email("amy.lee@mail.example.org").is_ok());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("amy@example").is_err());
        assert!(validate_email("amy@@example.com").is_err());
        assert!(validate_email("amy@example..com").is_err());
        assert!(validate_email("amy lee@example.com").is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(validate_password("12345"), Err(Error::PasswordTooShort));
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn logout_only_ends_one_session() {
        let mut data = DataStore::default();
        let a = data
            .register_user("a@example.com", "hash", "Amy", "Lee", "first")
            .unwrap();
        data.start_session(a, "second").unwrap();

        assert_eq!(data.end_session("first"), Ok(a));
        assert_eq!(data.resolve_token("first"), None);
        assert_eq!(data.resolve_token("second"), Some(a));
        assert_eq!(data.end_session("first"), Err(Error::InvalidToken));
    }

    #[test]
    fn profiles_need_a_session() {
        let mut data = DataStore::default();
        let a = register(&mut data, "a@example.com", "Amy", "Lee");
        let b = register(&mut data, "b@example.com", "Bob", "Ray");

        let all = data.list_users("tok-a@example.com").unwrap();
        let ids: Vec<_> = all.iter().map(|u| u.u_id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(data.list_users("nope"), Err(Error::InvalidToken));

        let bob = data.user_profile("tok-a@example.com", b).unwrap();
        assert_eq!(bob.handle_str, "bobray");
        assert_eq!(bob.email, "b@example.com");
        assert_eq!(
            data.user_profile("tok-a@example.com", 77),
            Err(Error::UnknownUser(77))
        );
    }

    #[test]
    fn handle_changes_are_validated() {
        let mut data = DataStore::default();
        let a = register(&mut data, "a@example.com", "Amy", "Lee");
        register(&mut data, "b@example.com", "Bob", "Ray");
        let tok = "tok-a@example.com";

        assert_eq!(data.set_handle(tok, "ab"), Err(Error::InvalidHandle));
        assert_eq!(data.set_handle(tok, &"a".repeat(21)), Err(Error::InvalidHandle));
        assert_eq!(data.set_handle(tok, "amy_lee"), Err(Error::InvalidHandle));
        assert_eq!(data.set_handle(tok, "bobray"), Err(Error::HandleInUse));
        assert_eq!(data.handle_of(a), Some("amylee"));

        data.set_handle(tok, "amylee").unwrap();
        data.set_handle(tok, "Amy2024").unwrap();
        assert_eq!(data.handle_of(a), Some("Amy2024"));
        assert_eq!(data.set_handle("nope", "fresh"), Err(Error::InvalidToken));
    }

    #[test]
    fn email_and_name_changes_are_validated() {
        let mut data = DataStore::default();
        let a = register(&mut data, "a@example.com", "Amy", "Lee");
        register(&mut data, "b@example.com", "Bob", "Ray");
        let tok = "tok-a@example.com";

        assert_eq!(data.set_email(tok, "b@example.com"), Err(Error::EmailInUse));
        assert_eq!(data.set_email(tok, "broken"), Err(Error::InvalidEmail));
        data.set_email(tok, "amy@example.org").unwrap();
        assert!(data.user_by_email("a@example.com").is_none());
        assert_eq!(data.user_by_email("amy@example.org").map(|u| u.id), Some(a));

        assert_eq!(data.set_name(tok, "", "Lee"), Err(Error::InvalidName));
        data.set_name(tok, "Amelia", "Lee-Park").unwrap();
        let row = data.user(a).unwrap();
        assert_eq!((row.name_first.as_str(), row.name_last.as_str()), ("Amelia", "Lee-Park"));
        assert_eq!(row.handle, "amylee");
    }

    #[test]
    fn session_for_unknown_user_fails() {
        let mut data = DataStore::default();
        assert_eq!(data.start_session(4, "t"), Err(Error::UnknownUser(4)));
    }
}
