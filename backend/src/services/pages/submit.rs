//! Page form submission.
//!
//! Validation failures are not HTTP errors: they answer `200` with the
//! messages in `errors` so the client can show them inline. Only unknown
//! pages, unknown actions and storage failures produce error statuses.

use super::form::{apply_submission, page_schema, submitted_state, validate};
use super::requested_facets;
use super::upload::discard_uploads;
use crate::config::AdminConfig;
use crate::db;
use crate::services::responses::{json_error, json_ok};
use actix_web::{web, HttpRequest, HttpResponse};
use admin_common::form::pristine::{ACTION_PUBLISH, ACTION_SAVE};
use admin_common::form::SchemaRequest;
use admin_common::model::schema::{FieldError, FormSchema, FormValues, SchemaId};
use admin_common::requests::SubmitRequest;
use std::path::{Path, PathBuf};

/// Why a submission was refused with an error status.
#[derive(Debug, PartialEq)]
pub(super) struct Rejection {
    pub status: u16,
    pub message: Option<String>,
}

impl Rejection {
    fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

pub async fn process(
    id: web::Path<i64>,
    req: HttpRequest,
    payload: web::Json<SubmitRequest>,
    config: web::Data<AdminConfig>,
) -> HttpResponse {
    let SubmitRequest { values, action } = payload.into_inner();
    let request = requested_facets(&req);
    respond(&config, id.into_inner(), values, action, request, Vec::new()).await
}

/// Runs [`submit_page`] off the async workers and turns its outcome into a
/// response.
///
/// `uploads` are the files already written for this submission. They are
/// removed again unless the page was stored.
pub(super) async fn respond(
    config: &AdminConfig,
    id: i64,
    values: FormValues,
    action: String,
    request: SchemaRequest,
    uploads: Vec<PathBuf>,
) -> HttpResponse {
    let database = config.database.clone();
    let handle = tokio::task::spawn_blocking(move || {
        let outcome = submit_page(&database, id, &values, &action, request);
        let stored = matches!(&outcome, Ok(schema) if schema.errors.is_none());
        if !stored {
            discard_uploads(&uploads);
        }
        outcome
    });

    match handle.await {
        Ok(Ok(schema)) => json_ok(&schema),
        Ok(Err(rejection)) => json_error(rejection.status, rejection.message.as_deref()),
        Err(join_err) => {
            log::error!("Submitting page {} panicked: {}", id, join_err);
            json_error(500, None)
        }
    }
}

/// Validates and stores a submission of page `id`.
///
/// Returns the schema response to send: `{ id, errors }` (plus `state` when
/// requested) for invalid values, `{ id, schema, state }` with a "Saved"
/// message once stored.
pub(super) fn submit_page(
    database: &Path,
    id: i64,
    values: &FormValues,
    action: &str,
    request: SchemaRequest,
) -> Result<FormSchema, Rejection> {
    if action != ACTION_SAVE && action != ACTION_PUBLISH {
        return Err(Rejection::new(
            400,
            Some(format!("Unknown form action \"{}\"", action)),
        ));
    }

    let storage_failure = |e: String| {
        log::error!("Saving page {} failed: {}", id, e);
        Rejection::new(500, None)
    };
    let conn = db::open(database).map_err(storage_failure)?;
    let page = db::get_page(&conn, id)
        .map_err(storage_failure)?
        .ok_or_else(|| Rejection::new(404, None))?;

    let errors = validate(values);
    if !errors.is_empty() {
        log::info!("Page {} submission rejected with {} error(s)", id, errors.len());
        return Ok(FormSchema {
            id: Some(SchemaId::Number(id)),
            schema: None,
            state: request.state.then(|| submitted_state(&page, values)),
            errors: Some(errors),
        });
    }

    let updated = apply_submission(&page, values, action);
    db::update_page(&conn, &updated).map_err(storage_failure)?;
    log::info!("Page {} saved with {}", id, action);

    let mut schema = page_schema(
        &updated,
        SchemaRequest {
            schema: true,
            state: true,
            errors: false,
        },
    );
    if let Some(state) = schema.state.as_mut() {
        state.messages.push(FieldError::form_level("Saved", "good"));
    }
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pages::configure_routes;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    fn test_config(dir: &tempfile::TempDir) -> AdminConfig {
        let config = AdminConfig {
            database: dir.path().join("admin.sqlite"),
            ..Default::default()
        };
        let conn = db::open(&config.database).unwrap();
        db::seed(&conn).unwrap();
        config
    }

    fn values(value: Value) -> FormValues {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn invalid_values_are_reported_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let schema = submit_page(
            &config.database,
            1,
            &values(json!({ "Title": "", "Content": "x" })),
            ACTION_SAVE,
            SchemaRequest::parse_header(""),
        )
        .unwrap();

        assert_eq!(schema.id, Some(SchemaId::Number(1)));
        assert!(schema.state.is_none());
        let errors = schema.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field.as_deref(), Some("Title"));

        let conn = db::open(&config.database).unwrap();
        assert_eq!(db::get_page(&conn, 1).unwrap().unwrap().title, "Home");
    }

    #[test]
    fn requested_state_echoes_submitted_values() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let schema = submit_page(
            &config.database,
            1,
            &values(json!({ "Title": "", "Content": "x" })),
            ACTION_SAVE,
            SchemaRequest::parse_header("auto,state,errors"),
        )
        .unwrap();

        let state = schema.state.unwrap();
        assert_eq!(state.field("Title").unwrap().value, json!(""));
        assert_eq!(state.field("Content").unwrap().value, json!("x"));
    }

    #[test]
    fn publish_marks_page_published() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let schema = submit_page(
            &config.database,
            1,
            &values(json!({ "Title": "Start", "Content": "<p>ok</p>" })),
            ACTION_PUBLISH,
            SchemaRequest::parse_header(""),
        )
        .unwrap();

        let state = schema.state.unwrap();
        assert_eq!(state.messages, vec![FieldError::form_level("Saved", "good")]);
        assert_eq!(state.field("Status").unwrap().value, json!("Published"));

        let conn = db::open(&config.database).unwrap();
        let page = db::get_page(&conn, 1).unwrap().unwrap();
        assert!(page.is_published);
        assert_eq!(page.url_segment, "start");
    }

    #[test]
    fn unknown_action_and_page_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let valid = values(json!({ "Title": "Ok" }));

        let bad_action = submit_page(
            &config.database,
            1,
            &valid,
            "action_delete",
            SchemaRequest::default(),
        );
        assert_eq!(bad_action.unwrap_err().status, 400);

        let missing = submit_page(&config.database, 99, &valid, ACTION_SAVE, SchemaRequest::default());
        assert_eq!(missing.unwrap_err(), Rejection::new(404, None));
    }

    #[actix_web::test]
    async fn json_submission_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(test_config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let invalid = actix_test::TestRequest::post()
            .uri("/admin/pages/EditForm/1")
            .set_json(json!({
                "values": { "Title": "Home", "Content": "<script>alert(1)</script>" },
                "action": "action_save"
            }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, invalid).await;
        assert_eq!(body["errors"][0]["field"], "Content");
        assert_eq!(body["errors"][0]["type"], "error");

        let valid = actix_test::TestRequest::post()
            .uri("/admin/pages/EditForm/1")
            .set_json(json!({
                "values": { "Title": "Home", "Content": "<p>Updated</p>" },
                "action": "action_save"
            }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, valid).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["state"]["messages"][0]["value"], "Saved");
        assert_eq!(body["state"]["messages"][0]["type"], "good");
        assert!(body.get("errors").is_none());
    }

    #[actix_web::test]
    async fn unknown_action_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(test_config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/admin/pages/EditForm/1")
            .set_json(json!({ "values": {}, "action": "action_archive" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["errors"][0]["value"], "Unknown form action \"action_archive\"");
    }
}
