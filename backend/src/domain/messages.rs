//! Message keys for user-facing feedback and error text.
//!
//! Keys are resolved through the [`MessageSource`](crate::domain::ports::MessageSource)
//! port; the patterns themselves live in the outbound message catalogue.

/// Feedback after a person was created. `{0}` is the full name.
pub const FEEDBACK_MESSAGE_KEY_PERSON_CREATED: &str = "feedback.message.person.created";
/// Feedback after a person was deleted. `{0}` is the full name.
pub const FEEDBACK_MESSAGE_KEY_PERSON_DELETED: &str = "feedback.message.person.deleted";
/// Feedback after a person was edited. `{0}` is the full name.
pub const FEEDBACK_MESSAGE_KEY_PERSON_EDITED: &str = "feedback.message.person.edited";
/// Error when the person targeted by a delete no longer exists.
pub const ERROR_MESSAGE_KEY_DELETED_PERSON_WAS_NOT_FOUND: &str = "error.message.deleted.not.found";
/// Error when the person targeted by an edit no longer exists.
pub const ERROR_MESSAGE_KEY_EDITED_PERSON_WAS_NOT_FOUND: &str = "error.message.edited.not.found";
