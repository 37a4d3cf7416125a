//! Person form handlers.
//!
//! ```text
//! GET  /                      list
//! GET  /person/create         empty create form
//! POST /person/create         firstName=Foo&lastName=Bar
//! GET  /person/edit/{id}      edit form
//! POST /person/edit           id=5&firstName=Foo&lastName=Bar
//! POST /person/delete/{id}
//! POST /person/search         searchTerm=Bar&searchType=NAMED_QUERY
//! ```
//!
//! Handlers bind and validate input, call [`PersonController`], and turn its
//! outcome into a JSON view envelope or a `303 See Other` redirect.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{
    Error, FIELD_ID, PersonDto, PersonForm, PersonId, SearchDto, SearchType,
    validate_person_form,
};

use super::ApiResult;
use super::controller::PersonController;
use super::flash::{FlashContext, FlashMessages};
use super::state::HttpState;
use super::view::{Outcome, View};

/// Raw person form fields as submitted by the browser.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFormBody {
    /// Blank on the create form.
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PersonFormBody {
    /// Convert into a DTO. A blank id means "no id"; anything else must be a
    /// positive integer.
    fn into_dto(self) -> Result<PersonDto, Error> {
        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_person_id(raw)?),
        };
        Ok(PersonDto {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}

/// Raw search form fields. A select left on its empty option submits
/// `searchType=`, which means "no type".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFormBody {
    pub search_term: Option<String>,
    /// Wire name such as `NAMED_QUERY`; blank means no type.
    pub search_type: Option<String>,
}

impl SearchFormBody {
    fn into_criteria(self) -> Result<SearchDto, Error> {
        let search_type = match self.search_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<SearchType>().map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "searchType", "value": raw }))
            })?),
        };
        Ok(SearchDto {
            search_term: self.search_term,
            search_type,
        })
    }
}

fn parse_person_id(raw: &str) -> Result<PersonId, Error> {
    raw.parse::<i64>()
        .ok()
        .and_then(|value| PersonId::new(value).ok())
        .ok_or_else(|| {
            Error::invalid_request("person id must be a positive integer")
                .with_details(json!({ "field": FIELD_ID, "value": raw }))
        })
}

fn path_person_id(raw: i64) -> Result<PersonId, Error> {
    PersonId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": FIELD_ID }))
    })
}

/// Map form extraction failures onto the JSON error payload.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("malformed form: {err}")).into()
    })
}

/// Map path extraction failures onto the JSON error payload.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("malformed path: {err}")).into()
    })
}

fn render(view: View, flash: &FlashContext) -> HttpResponse {
    HttpResponse::Ok().json(view.with_flash(flash.take()))
}

fn respond(
    outcome: Outcome,
    flash: &FlashContext,
    messages: &FlashMessages,
) -> ApiResult<HttpResponse> {
    debug!(outcome = %outcome.describe(), "person controller finished");
    match outcome {
        Outcome::Render(view) => Ok(render(view, flash)),
        Outcome::Redirect { location } => {
            flash.store(messages)?;
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish())
        }
    }
}

/// List every person.
#[get("/")]
pub async fn show_list(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let view = PersonController::from_state(&state).show_list().await?;
    Ok(render(view, &flash))
}

/// Render the empty create form.
#[get("/person/create")]
pub async fn show_create_person_form(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let view = PersonController::from_state(&state).show_create_person_form();
    Ok(render(view, &flash))
}

/// Validate and create a person.
#[post("/person/create")]
pub async fn submit_create_person_form(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<PersonFormBody>,
) -> ApiResult<HttpResponse> {
    let dto = form.into_inner().into_dto()?;
    let validation = validate_person_form(&dto, PersonForm::Create);
    let mut messages = FlashMessages::default();
    let outcome = PersonController::from_state(&state)
        .submit_create_person_form(dto, validation, &mut messages)
        .await?;
    respond(outcome, &flash, &messages)
}

/// Render the edit form for a stored person.
#[get("/person/edit/{id}")]
pub async fn show_edit_person_form(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path_person_id(path.into_inner())?;
    let mut messages = FlashMessages::default();
    let outcome = PersonController::from_state(&state)
        .show_edit_person_form(id, &mut messages)
        .await?;
    respond(outcome, &flash, &messages)
}

/// Validate and apply an edit.
#[post("/person/edit")]
pub async fn submit_edit_person_form(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<PersonFormBody>,
) -> ApiResult<HttpResponse> {
    let dto = form.into_inner().into_dto()?;
    let validation = validate_person_form(&dto, PersonForm::Edit);
    let mut messages = FlashMessages::default();
    let outcome = PersonController::from_state(&state)
        .submit_edit_person_form(dto, validation, &mut messages)
        .await?;
    respond(outcome, &flash, &messages)
}

/// Delete a person.
#[post("/person/delete/{id}")]
pub async fn delete_person(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path_person_id(path.into_inner())?;
    let mut messages = FlashMessages::default();
    let outcome = PersonController::from_state(&state)
        .delete(id, &mut messages)
        .await?;
    respond(outcome, &flash, &messages)
}

/// Search people by last name.
#[post("/person/search")]
pub async fn search(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<SearchFormBody>,
) -> ApiResult<HttpResponse> {
    let criteria = form.into_inner().into_criteria()?;
    let view = PersonController::from_state(&state)
        .search(criteria)
        .await?;
    Ok(render(view, &flash))
}

/// Register every person route plus the extractor error mapping.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .app_data(path_config())
        .service(show_list)
        .service(show_create_person_form)
        .service(submit_create_person_form)
        .service(show_edit_person_form)
        .service(submit_edit_person_form)
        .service(delete_person)
        .service(search);
}
