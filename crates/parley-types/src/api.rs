use serde::{Deserialize, Serialize};

use crate::models::{DmId, DmSummary, Message, MessageId, User, UserId};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name_first: String,
    pub name_last: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub auth_user_id: UserId,
}

// -- Users --

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersAllResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileQuery {
    pub u_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetHandleRequest {
    pub handle_str: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetEmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetNameRequest {
    pub name_first: String,
    pub name_last: String,
}

// -- DMs --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DmCreateRequest {
    pub u_ids: Vec<UserId>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmCreateResponse {
    pub dm_id: DmId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DmListResponse {
    pub dms: Vec<DmSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmDetailsResponse {
    pub name: String,
    pub members: Vec<User>,
}

/// Query string for the details and remove routes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmQuery {
    pub dm_id: DmId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DmLeaveRequest {
    pub dm_id: DmId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmMessagesQuery {
    pub dm_id: DmId,
    pub start: i64,
}

/// A window of at most 50 messages. `end` is the next `start` to request,
/// or -1 once the log is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmMessagesResponse {
    pub messages: Vec<Message>,
    pub start: i64,
    pub end: i64,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendDmRequest {
    pub dm_id: DmId,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDmResponse {
    pub message_id: MessageId,
}

/// An empty `message` deletes the message instead of editing it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MessageEditRequest {
    pub message_id: MessageId,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRemoveQuery {
    pub message_id: MessageId,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_camel_case_field() {
        let req: DmCreateRequest = serde_json::from_str(r#"{"uIds":[1,2]}"#).unwrap();
        assert_eq!(req.u_ids, vec![1, 2]);
    }

    #[test]
    fn create_request_rejects_unknown_fields() {
        let res = serde_json::from_str::<DmCreateRequest>(r#"{"uIds":[],"dmId":3}"#);
        assert!(res.is_err());
    }

    #[test]
    fn exhausted_page_serializes_negative_end() {
        let page = DmMessagesResponse {
            messages: vec![],
            start: 4,
            end: -1,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({ "messages": [], "start": 4, "end": -1 }));
    }

    #[test]
    fn user_view_field_names() {
        let user = User {
            u_id: 7,
            email: "amy@example.com".into(),
            name_first: "Amy".into(),
            name_last: "Lee".into(),
            handle_str: "amylee".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["uId"], 7);
        assert_eq!(json["handleStr"], "amylee");
        assert_eq!(json["nameFirst"], "Amy");
    }
}
