//! View identifiers, model attributes, and controller outcomes.
//!
//! A rendered view is returned as a JSON envelope holding the view name and
//! its model; a redirect carries only the target location.

use serde::Serialize;

use crate::domain::{Person, PersonDto, SearchDto, ValidationResult};

use super::flash::FlashMessages;

/// View rendering the create form.
pub const PERSON_ADD_FORM_VIEW: &str = "person/create";
/// View rendering the edit form.
pub const PERSON_EDIT_FORM_VIEW: &str = "person/edit";
/// View listing every person.
pub const PERSON_LIST_VIEW: &str = "person/list";
/// View listing search results.
pub const PERSON_SEARCH_RESULT_VIEW: &str = "person/searchResults";

/// Location every mutating operation redirects to.
pub const REQUEST_MAPPING_LIST: &str = "/";

/// Attributes exposed to a view. Unset attributes are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Form backing object for the create and edit views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonDto>,
    /// People shown by the list and search views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<Vec<Person>>,
    /// Search form backing object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_criteria: Option<SearchDto>,
    /// Field errors of a rejected form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<ValidationResult>,
    /// Flash feedback from the previous redirect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_message: Option<String>,
    /// Flash error from the previous redirect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// A named view together with its model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    #[serde(rename = "view")]
    name: &'static str,
    model: Model,
}

impl View {
    /// Pair a view name with its model.
    pub fn new(name: &'static str, model: Model) -> Self {
        Self { name, model }
    }

    /// View identifier, for example `person/list`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attributes exposed to the view.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Expose pending flash messages to this render.
    #[must_use]
    pub fn with_flash(mut self, flash: FlashMessages) -> Self {
        let FlashMessages { feedback, error } = flash;
        self.model.feedback_message = feedback;
        self.model.error_message = error;
        self
    }
}

/// What a controller operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Render a view in the current response.
    Render(View),
    /// Send the browser elsewhere with `303 See Other`.
    Redirect { location: &'static str },
}

impl Outcome {
    /// Redirect to [`REQUEST_MAPPING_LIST`].
    pub fn redirect_to_list() -> Self {
        Self::Redirect {
            location: REQUEST_MAPPING_LIST,
        }
    }

    /// `redirect:/`-style description, handy in logs and assertions.
    pub fn describe(&self) -> String {
        match self {
            Self::Render(view) => view.name().to_owned(),
            Self::Redirect { location } => format!("redirect:{location}"),
        }
    }
}
