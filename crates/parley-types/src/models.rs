use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type DmId = u64;
pub type MessageId = u64;

/// Public view of a user. Never carries the password hash or session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub u_id: UserId,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle_str: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: MessageId,
    pub u_id: UserId,
    pub message: String,
    /// Unix timestamp in seconds.
    pub time_sent: i64,
}

/// One entry of a user's DM list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmSummary {
    pub dm_id: DmId,
    pub name: String,
}
