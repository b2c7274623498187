//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test as actix_test;
use actix_web::{App, HttpResponse, web};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("pool exhausted while loading tickets")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_input("Invalid input data."), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("Only admins can assign tickets."), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Ticket not found."), StatusCode::NOT_FOUND)]
#[case(Error::persistence("Database error."), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

struct Rendered {
    status: StatusCode,
    trace_header: Option<String>,
    body: Value,
}

async fn render(error: &Error) -> Rendered {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    Rendered {
        status,
        trace_header,
        body: serde_json::from_slice(&bytes).expect("error JSON"),
    }
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error: Error) {
    let Rendered {
        status,
        trace_header,
        body,
    } = render(&internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_header.as_deref(), Some(TRACE_ID));
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], INTERNAL_MESSAGE);
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn persistence_errors_keep_generic_message() {
    let Rendered {
        status,
        trace_header,
        body,
    } = render(&Error::persistence("Database error.")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(trace_header.is_none());
    assert_eq!(body["code"], "persistence_error");
    assert_eq!(body["message"], "Database error.");
}

#[rstest]
#[actix_web::test]
async fn invalid_input_details_reach_the_client() {
    let error = Error::invalid_input("Invalid input data.")
        .with_details(json!({"field": "title", "code": "too_short"}));
    let body = render(&error).await.body;

    assert_eq!(body["code"], "invalid_input");
    assert_eq!(body["details"], json!({"field": "title", "code": "too_short"}));
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
    assert_eq!(err.details(), None);
}

#[derive(Debug, Deserialize)]
struct Probe {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ProbeQuery {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    limit: u32,
}

#[rstest]
#[case::malformed(r#"{"title": "#, "malformed_json")]
#[case::missing_field(r#"{}"#, "malformed_json")]
#[actix_web::test]
async fn json_extractor_failures_become_invalid_input(
    #[case] payload: &'static str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<Probe>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_input");
    assert_eq!(body["details"]["source"], "body");
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn query_and_path_failures_become_invalid_input() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .route(
                "/query",
                web::get().to(|_: web::Query<ProbeQuery>| async { HttpResponse::Ok().finish() }),
            )
            .route(
                "/path/{id}",
                web::get().to(|_: web::Path<u32>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;

    for (uri, source) in [("/query?limit=lots", "query"), ("/path/abc", "path")] {
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["source"], source);
    }
}
