use parley_types::models::{DmId, MessageId, UserId};

use crate::error::{Error, Result};
use crate::models::{DataStore, MessageRow};

pub const MAX_MESSAGE_LEN: usize = 1000;

impl DataStore {
    /// Append a message from the caller to a DM's log.
    pub fn send_dm_message(
        &mut self,
        token: &str,
        dm_id: DmId,
        body: &str,
        sent_at: i64,
    ) -> Result<MessageId> {
        let author_id = self.authenticate(token)?;
        let dm = self.dm(dm_id).ok_or(Error::UnknownDm(dm_id))?;

        let len = body.chars().count();
        if len == 0 || len > MAX_MESSAGE_LEN {
            return Err(Error::InvalidMessageLength);
        }
        if !dm.is_member(author_id) {
            return Err(Error::NotMember);
        }

        let id = self.next_message_id();
        if let Some(dm) = self.dm_mut(dm_id) {
            dm.messages.push(MessageRow {
                id,
                author_id,
                body: body.to_string(),
                sent_at,
            });
        }

        Ok(id)
    }

    /// Replace a message's body. An empty body removes the message.
    pub fn edit_dm_message(&mut self, token: &str, message_id: MessageId, body: &str) -> Result<()> {
        let user_id = self.authenticate(token)?;
        if body.chars().count() > MAX_MESSAGE_LEN {
            return Err(Error::InvalidMessageLength);
        }
        let (dm_index, message_index) = self.editable_message(user_id, message_id)?;

        let messages = &mut self.dms[dm_index].messages;
        if body.is_empty() {
            messages.remove(message_index);
        } else {
            messages[message_index].body = body.to_string();
        }
        Ok(())
    }

    pub fn remove_dm_message(&mut self, token: &str, message_id: MessageId) -> Result<()> {
        let user_id = self.authenticate(token)?;
        let (dm_index, message_index) = self.editable_message(user_id, message_id)?;
        self.dms[dm_index].messages.remove(message_index);
        Ok(())
    }

    /// Position of a message the caller may change: it must sit in a DM the
    /// caller belongs to, and the caller must be its author or a DM owner.
    fn editable_message(&self, user_id: UserId, message_id: MessageId) -> Result<(usize, usize)> {
        let (dm_index, message_index) = self
            .dms
            .iter()
            .enumerate()
            .filter(|(_, dm)| dm.is_member(user_id))
            .find_map(|(i, dm)| {
                dm.messages
                    .iter()
                    .position(|m| m.id == message_id)
                    .map(|j| (i, j))
            })
            .ok_or(Error::UnknownMessage(message_id))?;

        let dm = &self.dms[dm_index];
        if dm.messages[message_index].author_id != user_id && !dm.is_owner(user_id) {
            return Err(Error::NotAuthor);
        }
        Ok((dm_index, message_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (DataStore, DmId, DmId) {
        let mut data = DataStore::default();
        data.register_user("a@example.com", "hash", "Amy", "Lee", "a").unwrap();
        let b = data.register_user("b@example.com", "hash", "Bob", "Ray", "b").unwrap();
        data.register_user("c@example.com", "hash", "Cal", "Fox", "c").unwrap();
        let first = data.create_dm("a", &[b]).unwrap();
        let second = data.create_dm("b", &[]).unwrap();
        (data, first, second)
    }

    #[test]
    fn message_ids_are_unique_across_dms() {
        let (mut data, first, second) = store();
        let ids = [
            data.send_dm_message("a", first, "hi", 1).unwrap(),
            data.send_dm_message("b", second, "note to self", 2).unwrap(),
            data.send_dm_message("b", first, "hey", 3).unwrap(),
        ];
        assert_eq!(ids, [0, 1, 2]);

        let log: Vec<_> = data.dm(first).unwrap().messages.iter().map(|m| m.id).collect();
        assert_eq!(log, vec![0, 2]);
    }

    #[test]
    fn message_length_is_bounded() {
        let (mut data, first, _) = store();
        assert_eq!(
            data.send_dm_message("a", first, "", 0),
            Err(Error::InvalidMessageLength)
        );
        let long = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert_eq!(
            data.send_dm_message("a", first, &long, 0),
            Err(Error::InvalidMessageLength)
        );
        assert!(data.send_dm_message("a", first, &long[1..], 0).is_ok());
    }

    fn bodies(data: &DataStore, dm_id: DmId) -> Vec<String> {
        let page = data.dm_messages(data.resolve_token("a").unwrap(), dm_id, 0).unwrap();
        page.messages.into_iter().map(|m| m.message).collect()
    }

    #[test]
    fn edits_show_up_in_the_pager() {
        let (mut data, first, _) = store();
        let hi = data.send_dm_message("b", first, "hi", 1).unwrap();
        data.send_dm_message("a", first, "hello", 2).unwrap();

        data.edit_dm_message("b", hi, "hi there").unwrap();
        assert_eq!(bodies(&data, first), vec!["hi there", "hello"]);

        data.edit_dm_message("b", hi, "").unwrap();
        assert_eq!(bodies(&data, first), vec!["hello"]);
        assert_eq!(
            data.edit_dm_message("b", hi, "again"),
            Err(Error::UnknownMessage(hi))
        );
    }

    #[test]
    fn removal_shifts_the_pager() {
        let (mut data, first, _) = store();
        let ids: Vec<_> = (0..3)
            .map(|i| data.send_dm_message("a", first, &format!("m{i}"), i).unwrap())
            .collect();
        data.remove_dm_message("a", ids[1]).unwrap();
        assert_eq!(bodies(&data, first), vec!["m0", "m2"]);
        assert_eq!(
            data.remove_dm_message("a", ids[1]),
            Err(Error::UnknownMessage(ids[1]))
        );
    }

    #[test]
    fn only_author_or_owner_may_change_a_message() {
        let (mut data, first, _) = store();
        let from_owner = data.send_dm_message("a", first, "owner says", 1).unwrap();
        let from_bob = data.send_dm_message("b", first, "bob says", 2).unwrap();

        assert_eq!(data.edit_dm_message("b", from_owner, "x"), Err(Error::NotAuthor));
        assert_eq!(data.remove_dm_message("b", from_owner), Err(Error::NotAuthor));
        // a owns the DM, so it may change bob's message
        data.edit_dm_message("a", from_bob, "moderated").unwrap();
        assert_eq!(bodies(&data, first), vec!["owner says", "moderated"]);
    }

    #[test]
    fn message_outside_callers_dms_is_unknown() {
        let (mut data, first, _) = store();
        let id = data.send_dm_message("a", first, "private", 1).unwrap();
        assert_eq!(data.edit_dm_message("c", id, "x"), Err(Error::UnknownMessage(id)));
        assert_eq!(data.remove_dm_message("c", id), Err(Error::UnknownMessage(id)));
        assert_eq!(data.remove_dm_message("zz", id), Err(Error::InvalidToken));
        assert_eq!(
            data.edit_dm_message("a", id, &"x".repeat(MAX_MESSAGE_LEN + 1)),
            Err(Error::InvalidMessageLength)
        );
        assert_eq!(bodies(&data, first), vec!["private"]);
    }

    #[test]
    fn non_member_cannot_send() {
        let (mut data, first, _) = store();
        assert_eq!(data.send_dm_message("c", first, "hi", 0), Err(Error::NotMember));
        assert_eq!(data.send_dm_message("zz", first, "hi", 0), Err(Error::InvalidToken));
        assert_eq!(data.send_dm_message("a", 40, "hi", 0), Err(Error::UnknownDm(40)));
    }
}
