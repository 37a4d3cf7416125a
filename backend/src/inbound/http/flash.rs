//! Redirect-scoped flash messages kept in the cookie session.
//!
//! A redirect stores the messages under [`FLASH_KEY`]; the next rendered view
//! takes them out again so each message is shown once.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash";

/// Feedback and error messages attached to a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessages {
    /// Confirmation of a successful change.
    pub feedback: Option<String>,
    /// Explanation of why an operation did nothing.
    pub error: Option<String>,
}

impl FlashMessages {
    /// Attach a feedback message, replacing any earlier one.
    pub fn add_feedback_message(&mut self, message: impl Into<String>) {
        self.feedback = Some(message.into());
    }

    /// Attach an error message, replacing any earlier one.
    pub fn add_error_message(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Whether neither message is set.
    pub fn is_empty(&self) -> bool {
        self.feedback.is_none() && self.error.is_none()
    }
}

/// Session wrapper exposing flash storage to handlers.
#[derive(Clone)]
pub struct FlashContext(Session);

impl FlashContext {
    /// Wrap a request session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist messages for the next request. Empty messages clear the slot.
    pub fn store(&self, messages: &FlashMessages) -> Result<(), Error> {
        if messages.is_empty() {
            self.0.remove(FLASH_KEY);
            return Ok(());
        }
        self.0
            .insert(FLASH_KEY, messages)
            .map_err(|error| Error::internal(format!("failed to persist flash messages: {error}")))
    }

    /// Remove and return pending messages.
    ///
    /// A corrupt entry is dropped rather than failing the render.
    pub fn take(&self) -> FlashMessages {
        match self.0.remove_as::<FlashMessages>(FLASH_KEY) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                warn!(%raw, "discarding unreadable flash messages");
                FlashMessages::default()
            }
            None => FlashMessages::default(),
        }
    }
}

impl FromRequest for FlashContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FlashContext::new) })
    }
}
