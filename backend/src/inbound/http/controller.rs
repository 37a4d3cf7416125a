//! Person controller: the request-independent half of the HTTP adapter.
//!
//! Each operation takes already-bound input (DTOs, ids, validation results)
//! and returns either a view to render or a redirect. Flash messages are
//! written into the caller's [`FlashMessages`]; handlers decide where they
//! are stored. Not-found failures become error messages; every other
//! service failure propagates as a domain [`Error`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::messages::{
    ERROR_MESSAGE_KEY_DELETED_PERSON_WAS_NOT_FOUND, ERROR_MESSAGE_KEY_EDITED_PERSON_WAS_NOT_FOUND,
    FEEDBACK_MESSAGE_KEY_PERSON_CREATED, FEEDBACK_MESSAGE_KEY_PERSON_DELETED,
    FEEDBACK_MESSAGE_KEY_PERSON_EDITED,
};
use crate::domain::ports::{MessageSource, PersonService, PersonServiceError};
use crate::domain::{Error, Person, PersonDto, PersonId, SearchDto, ValidationResult};

use super::flash::FlashMessages;
use super::state::HttpState;
use super::view::{
    Model, Outcome, PERSON_ADD_FORM_VIEW, PERSON_EDIT_FORM_VIEW, PERSON_LIST_VIEW,
    PERSON_SEARCH_RESULT_VIEW, View,
};

/// Orchestrates the person service and message source for the person
/// views.
#[derive(Clone)]
pub struct PersonController {
    persons: Arc<dyn PersonService>,
    messages: Arc<dyn MessageSource>,
}

impl PersonController {
    /// Build a controller over explicit ports.
    pub fn new(persons: Arc<dyn PersonService>, messages: Arc<dyn MessageSource>) -> Self {
        Self { persons, messages }
    }

    /// Build a controller from the shared handler state.
    pub fn from_state(state: &HttpState) -> Self {
        Self::new(Arc::clone(&state.persons), Arc::clone(&state.messages))
    }

    /// Empty create form.
    pub fn show_create_person_form(&self) -> View {
        View::new(
            PERSON_ADD_FORM_VIEW,
            Model {
                person: Some(PersonDto::default()),
                ..Model::default()
            },
        )
    }

    /// Create a person and redirect to the list with a feedback message.
    ///
    /// A form with field errors is rendered again without calling the service.
    pub async fn submit_create_person_form(
        &self,
        dto: PersonDto,
        validation: ValidationResult,
        flash: &mut FlashMessages,
    ) -> Result<Outcome, Error> {
        if validation.has_errors() {
            debug!(fields = ?validation.fields(), "create form rejected");
            return Ok(form_with_errors(PERSON_ADD_FORM_VIEW, dto, validation));
        }

        let created = self.persons.create(&dto).await?;
        self.feedback(flash, FEEDBACK_MESSAGE_KEY_PERSON_CREATED, &created);
        Ok(Outcome::redirect_to_list())
    }

    /// Edit form pre-filled from the stored person.
    ///
    /// A missing person redirects to the list with an error message.
    pub async fn show_edit_person_form(
        &self,
        id: PersonId,
        flash: &mut FlashMessages,
    ) -> Result<Outcome, Error> {
        match self.persons.find_by_id(id).await? {
            Some(person) => Ok(Outcome::Render(View::new(
                PERSON_EDIT_FORM_VIEW,
                Model {
                    person: Some(PersonDto::from(&person)),
                    ..Model::default()
                },
            ))),
            None => {
                info!(person_id = %id, "edit requested for missing person");
                self.error(flash, ERROR_MESSAGE_KEY_EDITED_PERSON_WAS_NOT_FOUND);
                Ok(Outcome::redirect_to_list())
            }
        }
    }

    /// Apply an edit and redirect to the list.
    ///
    /// Field errors re-render the edit form; a person removed in the meantime
    /// produces an error message instead of feedback.
    pub async fn submit_edit_person_form(
        &self,
        dto: PersonDto,
        validation: ValidationResult,
        flash: &mut FlashMessages,
    ) -> Result<Outcome, Error> {
        if validation.has_errors() {
            debug!(fields = ?validation.fields(), "edit form rejected");
            return Ok(form_with_errors(PERSON_EDIT_FORM_VIEW, dto, validation));
        }

        match self.persons.update(&dto).await {
            Ok(updated) => {
                self.feedback(flash, FEEDBACK_MESSAGE_KEY_PERSON_EDITED, &updated);
            }
            Err(PersonServiceError::NotFound { id }) => {
                info!(person_id = id, "edited person was not found");
                self.error(flash, ERROR_MESSAGE_KEY_EDITED_PERSON_WAS_NOT_FOUND);
            }
            Err(other) => return Err(other.into()),
        }
        Ok(Outcome::redirect_to_list())
    }

    /// Delete a person and redirect to the list with feedback, or with an
    /// error message when the person is already gone.
    pub async fn delete(&self, id: PersonId, flash: &mut FlashMessages) -> Result<Outcome, Error> {
        match self.persons.delete(id).await {
            Ok(deleted) => {
                self.feedback(flash, FEEDBACK_MESSAGE_KEY_PERSON_DELETED, &deleted);
            }
            Err(PersonServiceError::NotFound { .. }) => {
                info!(person_id = %id, "deleted person was not found");
                self.error(flash, ERROR_MESSAGE_KEY_DELETED_PERSON_WAS_NOT_FOUND);
            }
            Err(other) => return Err(other.into()),
        }
        Ok(Outcome::redirect_to_list())
    }

    /// Search results for `criteria`.
    pub async fn search(&self, criteria: SearchDto) -> Result<View, Error> {
        let persons = self.persons.search(&criteria).await?;
        Ok(View::new(
            PERSON_SEARCH_RESULT_VIEW,
            Model {
                persons: Some(persons),
                ..Model::default()
            },
        ))
    }

    /// Every person plus blank search criteria for the search form.
    pub async fn show_list(&self) -> Result<View, Error> {
        let persons = self.persons.find_all().await?;
        Ok(View::new(
            PERSON_LIST_VIEW,
            Model {
                persons: Some(persons),
                search_criteria: Some(SearchDto::default()),
                ..Model::default()
            },
        ))
    }

    fn feedback(&self, flash: &mut FlashMessages, key: &str, person: &Person) {
        flash.add_feedback_message(self.messages.resolve(key, &[person.name()]));
    }

    fn error(&self, flash: &mut FlashMessages, key: &str) {
        flash.add_error_message(self.messages.resolve(key, &[]));
    }
}

fn form_with_errors(view: &'static str, dto: PersonDto, validation: ValidationResult) -> Outcome {
    Outcome::Render(View::new(
        view,
        Model {
            person: Some(dto),
            field_errors: Some(validation),
            ..Model::default()
        },
    ))
}
