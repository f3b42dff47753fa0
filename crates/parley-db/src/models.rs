//! Store row types. These are what the snapshot file holds.
//! Distinct from parley-types API models so secrets never leak into responses.

use parley_types::models::{DmId, Message, MessageId, User, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStore {
    pub users: Vec<UserRow>,
    pub dms: Vec<DmRow>,
    #[serde(default)]
    next_user_id: UserId,
    #[serde(default)]
    next_dm_id: DmId,
    #[serde(default)]
    next_message_id: MessageId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub name_first: String,
    pub name_last: String,
    pub handle: String,
    pub is_global_owner: bool,
    pub session_tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmRow {
    pub id: DmId,
    pub name: String,
    pub owner_members: Vec<UserId>,
    pub all_members: Vec<UserId>,
    pub messages: Vec<MessageRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRow {
    pub id: MessageId,
    pub author_id: UserId,
    pub body: String,
    pub sent_at: i64,
}

impl DataStore {
    // -- Sequences --
    //
    // Ids come from counters carried in the snapshot, so they are never
    // handed out twice, across deletes and restarts alike.

    pub fn next_user_id(&mut self) -> UserId {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }

    pub fn next_dm_id(&mut self) -> DmId {
        let id = self.next_dm_id;
        self.next_dm_id += 1;
        id
    }

    pub fn next_message_id(&mut self) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    pub fn peek_next_dm_id(&self) -> DmId {
        self.next_dm_id
    }

    /// Drop every user and DM. Sequences keep counting.
    pub fn clear(&mut self) {
        self.users.clear();
        self.dms.clear();
    }
}

impl UserRow {
    pub fn to_user(&self) -> User {
        User {
            u_id: self.id,
            email: self.email.clone(),
            name_first: self.name_first.clone(),
            name_last: self.name_last.clone(),
            handle_str: self.handle.clone(),
        }
    }
}

impl MessageRow {
    pub fn to_message(&self) -> Message {
        Message {
            message_id: self.id,
            u_id: self.author_id,
            message: self.body.clone(),
            time_sent: self.sent_at,
        }
    }
}
