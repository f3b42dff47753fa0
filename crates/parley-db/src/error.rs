use parley_types::models::{DmId, MessageId, UserId};
use thiserror::Error;

/// Validation failures. Every operation checks these before touching the
/// store, so none of them leaves a partial write behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Token is invalid")]
    InvalidToken,

    #[error("Invalid uId: {0}")]
    UnknownUser(UserId),

    #[error("Duplicate uId entered: {0}")]
    DuplicateMember(UserId),

    #[error("dmId is invalid: {0}")]
    UnknownDm(DmId),

    #[error("User is not a member of the dm")]
    NotMember,

    #[error("User is not the owner of the dm")]
    NotOwner,

    #[error("Invalid start: {0}")]
    OutOfRangeStart(i64),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Email address is already in use")]
    EmailInUse,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Names must be between 1 and 50 characters")]
    InvalidName,

    #[error("Incorrect email or password")]
    IncorrectCredentials,

    #[error("Message must be between 1 and 1000 characters")]
    InvalidMessageLength,

    #[error("messageId is invalid: {0}")]
    UnknownMessage(MessageId),

    #[error("User did not send this message and is not the owner of the dm")]
    NotAuthor,

    #[error("Handles must be 3 to 20 alphanumeric characters")]
    InvalidHandle,

    #[error("Handle is already in use")]
    HandleInUse,
}

pub type Result<T> = std::result::Result<T, Error>;
