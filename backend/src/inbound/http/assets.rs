//! Asset REST handlers.
//!
//! ```text
//! GET  /api/v1/assets?status=active
//! POST /api/v1/assets {"name":"Dell Latitude","assetType":"Laptop"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Asset;
use crate::domain::ports::{CreateAssetRequest, ListAssetsRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tickets::MutationResponse;
use crate::inbound::http::validation::raw_from_optional;

/// Asset as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub id: i64,
    pub name: String,
    pub asset_type: String,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Asset> for AssetResponse {
    fn from(value: Asset) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            asset_type: value.asset_type,
            serial_number: value.serial_number,
            location: value.location,
            status: value.status.as_str().to_owned(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Query string for `GET /api/v1/assets`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetListParams {
    /// Status filter; unknown values are ignored.
    pub status: Option<String>,
}

/// Body of `POST /api/v1/assets`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetBody {
    #[serde(default)]
    #[schema(example = "Dell Latitude 7440")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Laptop")]
    pub asset_type: String,
    #[schema(value_type = Option<String>)]
    pub serial_number: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub location: Option<Value>,
}

/// List assets ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    params(AssetListParams),
    responses(
        (status = 200, description = "Assets", body = [AssetResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "listAssets"
)]
#[get("/assets")]
pub async fn list_assets(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<AssetListParams>,
) -> ApiResult<web::Json<Vec<AssetResponse>>> {
    let actor = session.require_user()?;
    let assets = state
        .assets_query
        .list(
            &actor,
            ListAssetsRequest {
                status: params.into_inner().status,
            },
        )
        .await?;
    Ok(web::Json(assets.into_iter().map(Into::into).collect()))
}

/// Register an asset. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    request_body = CreateAssetBody,
    responses(
        (status = 201, description = "Asset created", body = MutationResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "createAsset"
)]
#[post("/assets")]
pub async fn create_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateAssetBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    let body = payload.into_inner();
    let id = state
        .assets
        .create(CreateAssetRequest {
            actor: Some(actor),
            name: body.name,
            asset_type: body.asset_type,
            serial_number: raw_from_optional(body.serial_number.as_ref()),
            location: raw_from_optional(body.location.as_ref()),
        })
        .await?;
    Ok(HttpResponse::Created().json(MutationResponse::created(id.get())))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    use super::*;
    use crate::domain::test_fixtures::{admin, fixture_timestamp, tech};
    use crate::domain::{AssetId, AssetStatus, Error};
    use crate::inbound::http::test_utils::{
        MockPorts, SIGN_IN_PATH, session_cookie, sign_in_as, test_session_middleware,
    };

    macro_rules! assets_app {
        ($ports:expr, $signed_in:expr) => {
            test::init_service(
                App::new()
                    .wrap(test_session_middleware())
                    .app_data(web::Data::new($ports.into_state()))
                    .app_data(web::Data::new($signed_in))
                    .route(SIGN_IN_PATH, web::post().to(sign_in_as))
                    .service(
                        web::scope("/api/v1")
                            .service(list_assets)
                            .service(create_asset),
                    ),
            )
            .await
        };
    }

    macro_rules! signed_in {
        ($app:expr) => {
            session_cookie(
                &test::call_service(
                    &$app,
                    test::TestRequest::post().uri(SIGN_IN_PATH).to_request(),
                )
                .await,
            )
        };
    }

    fn laptop() -> Asset {
        Asset {
            id: AssetId::new(4).expect("asset id"),
            name: "Dell Latitude 7440".to_owned(),
            asset_type: "Laptop".to_owned(),
            serial_number: Some("SN-0042".to_owned()),
            location: None,
            status: AssetStatus::Active,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }

    #[actix_web::test]
    async fn list_renders_camel_case_assets() {
        let mut ports = MockPorts::default();
        ports
            .assets_query
            .expect_list()
            .withf(|_, request| request.status.as_deref() == Some("retired"))
            .times(1)
            .return_once(|_, _| Ok(vec![laptop()]));
        let app = assets_app!(ports, tech());
        let cookie = signed_in!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/assets?status=retired")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["assetType"], "Laptop");
        assert_eq!(body[0]["serialNumber"], "SN-0042");
        assert_eq!(body[0]["location"], Value::Null);
        assert_eq!(body[0]["status"], "active");
    }

    #[actix_web::test]
    async fn list_without_session_is_unauthorised() {
        let app = assets_app!(MockPorts::default(), tech());

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/assets").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_returns_created_id() {
        let mut ports = MockPorts::default();
        ports
            .assets
            .expect_create()
            .withf(|request| {
                request.actor == Some(admin())
                    && request.name == "Dell Latitude 7440"
                    && request.asset_type == "Laptop"
                    && request.serial_number.as_deref() == Some("1234")
                    && request.location.is_none()
            })
            .times(1)
            .return_once(|_| Ok(AssetId::new(4).expect("asset id")));
        let app = assets_app!(ports, admin());
        let cookie = signed_in!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/assets")
                .cookie(cookie)
                .set_json(json!({
                    "name": "Dell Latitude 7440",
                    "assetType": "Laptop",
                    "serialNumber": 1234,
                    "location": null,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"success": true, "id": 4}));
    }

    #[actix_web::test]
    async fn create_by_technician_is_forbidden() {
        let mut ports = MockPorts::default();
        ports
            .assets
            .expect_create()
            .return_once(|_| Err(Error::forbidden("Only admins can create assets.")));
        let app = assets_app!(ports, tech());
        let cookie = signed_in!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/assets")
                .cookie(cookie)
                .set_json(json!({"name": "Dell", "assetType": "Laptop"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Only admins can create assets.");
    }
}
