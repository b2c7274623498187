//! Tests for the asset service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::MockAssetRepository;
use crate::domain::test_fixtures::{admin, fixture_clock, fixture_timestamp, tech};
use crate::domain::ErrorCode;

fn make_service(repo: MockAssetRepository) -> AssetService<MockAssetRepository> {
    AssetService::new(Arc::new(repo), fixture_clock())
}

fn asset_id(value: i64) -> AssetId {
    AssetId::new(value).expect("positive asset id")
}

fn request(actor: Option<User>) -> CreateAssetRequest {
    CreateAssetRequest {
        actor,
        name: "Dell Latitude 7440".to_owned(),
        asset_type: "Laptop".to_owned(),
        serial_number: Some("SN-0042".to_owned()),
        location: Some("Floor 2".to_owned()),
    }
}

fn field_of(error: &Error) -> Option<&str> {
    error
        .details()
        .and_then(|details| details.get("field"))
        .and_then(serde_json::Value::as_str)
}

#[tokio::test]
async fn create_inserts_active_asset() {
    let mut repo = MockAssetRepository::new();
    repo.expect_insert()
        .withf(|asset| {
            *asset
                == NewAsset {
                    name: "Dell Latitude 7440".to_owned(),
                    asset_type: "Laptop".to_owned(),
                    serial_number: Some("SN-0042".to_owned()),
                    location: Some("Floor 2".to_owned()),
                    status: AssetStatus::Active,
                    created_at: fixture_timestamp(),
                }
        })
        .times(1)
        .return_once(|_| Ok(asset_id(5)));
    let service = make_service(repo);

    let id = service
        .create(request(Some(admin())))
        .await
        .expect("asset created");
    assert_eq!(id, asset_id(5));
}

#[rstest]
#[case::tech(Some(tech()))]
#[case::anonymous(None)]
#[tokio::test]
async fn create_by_non_admin_is_forbidden_before_validation(#[case] actor: Option<User>) {
    let mut repo = MockAssetRepository::new();
    repo.expect_insert().times(0);
    let service = make_service(repo);

    let mut invalid = request(actor);
    invalid.name = "x".to_owned();
    invalid.asset_type = String::new();
    let err = service.create(invalid).await.expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "Only admins can create assets.");
    assert!(err.details().is_none());
}

#[rstest]
#[case::name_short(|r: &mut CreateAssetRequest| r.name = "PC".to_owned(), "name")]
#[case::name_long(|r: &mut CreateAssetRequest| r.name = "n".repeat(101), "name")]
#[case::type_short(|r: &mut CreateAssetRequest| r.asset_type = "  ab ".to_owned(), "asset_type")]
#[case::type_long(|r: &mut CreateAssetRequest| r.asset_type = "t".repeat(51), "asset_type")]
#[case::serial_long(
    |r: &mut CreateAssetRequest| r.serial_number = Some("s".repeat(101)),
    "serial_number"
)]
#[case::location_long(|r: &mut CreateAssetRequest| r.location = Some("l".repeat(101)), "location")]
#[tokio::test]
async fn create_rejects_invalid_fields(
    #[case] mutate: fn(&mut CreateAssetRequest),
    #[case] field: &str,
) {
    let mut repo = MockAssetRepository::new();
    repo.expect_insert().times(0);
    let service = make_service(repo);

    let mut invalid = request(Some(admin()));
    mutate(&mut invalid);
    let err = service.create(invalid).await.expect_err("invalid");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), "Invalid input data.");
    assert_eq!(field_of(&err), Some(field));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("  "))]
#[tokio::test]
async fn create_stores_blank_optionals_as_null(#[case] raw: Option<&str>) {
    let mut repo = MockAssetRepository::new();
    repo.expect_insert()
        .withf(|asset| asset.serial_number.is_none() && asset.location.is_none())
        .times(1)
        .return_once(|_| Ok(asset_id(6)));
    let service = make_service(repo);

    let mut sparse = request(Some(admin()));
    sparse.serial_number = raw.map(str::to_owned);
    sparse.location = raw.map(str::to_owned);
    service.create(sparse).await.expect("asset created");
}

#[tokio::test]
async fn duplicate_serial_surfaces_as_generic_persistence_error() {
    let mut repo = MockAssetRepository::new();
    repo.expect_insert().times(1).return_once(|_| {
        Err(AssetRepositoryError::query(
            "duplicate key value violates unique constraint \"assets_serial_number_key\"",
        ))
    });
    let service = make_service(repo);

    let err = service
        .create(request(Some(admin())))
        .await
        .expect_err("duplicate serial");

    assert_eq!(err.code(), ErrorCode::PersistenceError);
    assert_eq!(err.message(), "Database error.");
}

#[rstest]
#[case(Some("retired"), Some(AssetStatus::Retired))]
#[case(Some("Retired"), None)]
#[case(None, None)]
#[tokio::test]
async fn list_passes_valid_status_filter(
    #[case] raw: Option<&str>,
    #[case] expected: Option<AssetStatus>,
) {
    let mut repo = MockAssetRepository::new();
    repo.expect_list()
        .withf(move |filter| filter.status == expected)
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let service = make_service(repo);

    let assets = service
        .list(
            &tech(),
            ListAssetsRequest {
                status: raw.map(str::to_owned),
            },
        )
        .await
        .expect("list");
    assert!(assets.is_empty());
}
