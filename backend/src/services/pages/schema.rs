use super::form::page_schema;
use super::requested_facets;
use crate::config::AdminConfig;
use crate::db;
use crate::services::responses::{json_error, json_ok};
use actix_web::{web, HttpRequest, HttpResponse};

pub async fn process(
    id: web::Path<i64>,
    req: HttpRequest,
    config: web::Data<AdminConfig>,
) -> HttpResponse {
    let id = id.into_inner();
    let page = db::open(&config.database).and_then(|conn| db::get_page(&conn, id));
    match page {
        Ok(Some(page)) => json_ok(&page_schema(&page, requested_facets(&req))),
        Ok(None) => json_error(404, None),
        Err(e) => {
            log::error!("Loading page {} failed: {}", id, e);
            json_error(500, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pages::configure_routes;
    use actix_web::{test as actix_test, App};
    use serde_json::Value;

    fn test_config(dir: &tempfile::TempDir) -> AdminConfig {
        let config = AdminConfig {
            database: dir.path().join("admin.sqlite"),
            ..Default::default()
        };
        let conn = db::open(&config.database).unwrap();
        db::seed(&conn).unwrap();
        config
    }

    #[actix_web::test]
    async fn serves_structure_and_state_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(test_config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/admin/pages/schema/EditForm/1")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["id"], 1);
        assert_eq!(body["schema"]["name"], "EditForm");
        assert_eq!(body["state"]["fields"][1]["value"], "Home");
        assert!(body.get("errors").is_none());
    }

    #[actix_web::test]
    async fn honours_requested_facets() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(test_config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/admin/pages/schema/EditForm/1")
            .insert_header(("X-FormSchema-Request", "auto,state"))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert!(body.get("schema").is_none());
        assert!(body.get("state").is_some());
    }

    #[actix_web::test]
    async fn unknown_page_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(test_config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/admin/pages/schema/EditForm/99")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status().as_u16(), 404);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["errors"][0]["code"], 404);
        assert_eq!(body["status"], "error");
    }
}
