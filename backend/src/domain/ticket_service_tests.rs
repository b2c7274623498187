//! Tests for the ticket service.

use std::sync::{Arc, Mutex};

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::MockTicketRepository;
use crate::domain::test_fixtures::{admin, fixture_clock, fixture_timestamp, tech, user};
use crate::domain::{ErrorCode, Role};

fn make_service(repo: MockTicketRepository) -> TicketService<MockTicketRepository> {
    TicketService::new(Arc::new(repo), fixture_clock())
}

fn ticket_id(value: i64) -> TicketId {
    TicketId::new(value).expect("positive ticket id")
}

fn create_request(title: &str) -> CreateTicketRequest {
    CreateTicketRequest {
        actor: Some(tech()),
        title: title.to_owned(),
        description: None,
        priority: "medium".to_owned(),
        asset_id: None,
    }
}

fn field_of(error: &Error) -> Option<&str> {
    error
        .details()
        .and_then(|details| details.get("field"))
        .and_then(serde_json::Value::as_str)
}

#[rstest]
#[case("Jam!", false)]
#[case("Jams!", true)]
#[tokio::test]
async fn create_enforces_title_minimum(#[case] title: &str, #[case] accepted: bool) {
    let mut repo = MockTicketRepository::new();
    repo.expect_insert()
        .times(usize::from(accepted))
        .returning(|_| Ok(ticket_id(10)));
    let service = make_service(repo);

    let result = service.create(create_request(title)).await;

    if accepted {
        assert_eq!(result.expect("five characters succeed"), ticket_id(10));
    } else {
        let err = result.expect_err("four characters fail");
        assert_eq!(err.code(), ErrorCode::InvalidInput);
        assert_eq!(err.message(), "Invalid input data.");
        assert_eq!(field_of(&err), Some("title"));
    }
}

#[tokio::test]
async fn create_persists_open_ticket_for_actor() {
    let captured: Arc<Mutex<Option<NewTicket>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);
    let mut repo = MockTicketRepository::new();
    repo.expect_insert().times(1).return_once(move |ticket| {
        *sink.lock().expect("capture lock") = Some(ticket.clone());
        Ok(ticket_id(1))
    });
    let service = make_service(repo);

    let request = CreateTicketRequest {
        actor: Some(user(1, "tech1", Role::Tech)),
        title: "Printer jam".to_owned(),
        description: Some(String::new()),
        priority: "medium".to_owned(),
        asset_id: None,
    };
    service.create(request).await.expect("ticket created");

    let ticket = captured
        .lock()
        .expect("capture lock")
        .clone()
        .expect("insert called");
    assert_eq!(
        ticket,
        NewTicket {
            title: "Printer jam".to_owned(),
            description: String::new(),
            priority: TicketPriority::Medium,
            status: TicketStatus::Open,
            asset_id: None,
            created_by: UserId::new(1).expect("user id"),
            created_at: fixture_timestamp(),
        }
    );
}

#[tokio::test]
async fn create_without_actor_is_invalid_input() {
    let mut repo = MockTicketRepository::new();
    repo.expect_insert().times(0);
    let service = make_service(repo);

    let mut request = create_request("Printer jam");
    request.actor = None;
    let err = service.create(request).await.expect_err("actor required");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(field_of(&err), Some("actor"));
}

#[rstest]
#[case::priority_casing(|r: &mut CreateTicketRequest| r.priority = "Medium".to_owned(), "priority")]
#[case::priority_unknown(|r: &mut CreateTicketRequest| r.priority = "urgent".to_owned(), "priority")]
#[case::description_too_long(
    |r: &mut CreateTicketRequest| r.description = Some("d".repeat(5001)),
    "description"
)]
#[case::asset_not_integer(|r: &mut CreateTicketRequest| r.asset_id = Some("laptop".to_owned()), "asset_id")]
#[case::asset_negative(|r: &mut CreateTicketRequest| r.asset_id = Some("-2".to_owned()), "asset_id")]
#[case::title_too_long(|r: &mut CreateTicketRequest| r.title = "t".repeat(256), "title")]
#[tokio::test]
async fn create_rejects_invalid_fields(
    #[case] mutate: fn(&mut CreateTicketRequest),
    #[case] field: &str,
) {
    let mut repo = MockTicketRepository::new();
    repo.expect_insert().times(0);
    let service = make_service(repo);

    let mut request = create_request("Printer jam");
    mutate(&mut request);
    let err = service.create(request).await.expect_err("validation fails");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(field_of(&err), Some(field));
}

#[rstest]
#[case(None, None)]
#[case(Some(""), None)]
#[case(Some("0"), None)]
#[case(Some(" 4 "), Some(4))]
#[tokio::test]
async fn create_parses_optional_asset(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
    let expected_asset = expected.map(|value| AssetId::new(value).expect("asset id"));
    let mut repo = MockTicketRepository::new();
    repo.expect_insert()
        .withf(move |ticket| ticket.asset_id == expected_asset)
        .times(1)
        .return_once(|_| Ok(ticket_id(3)));
    let service = make_service(repo);

    let mut request = create_request("Monitor flicker");
    request.asset_id = raw.map(str::to_owned);
    service.create(request).await.expect("ticket created");
}

#[rstest]
#[case(TicketRepositoryError::query("insert or update on table violates foreign key"))]
#[case(TicketRepositoryError::connection("pool timed out"))]
#[tokio::test]
async fn create_hides_store_failures(#[case] failure: TicketRepositoryError) {
    let mut repo = MockTicketRepository::new();
    repo.expect_insert().times(1).return_once(move |_| Err(failure));
    let service = make_service(repo);

    let err = service
        .create(create_request("Printer jam"))
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), ErrorCode::PersistenceError);
    assert_eq!(err.message(), "Database error.");
    assert!(err.details().is_none());
}

#[tokio::test]
async fn update_status_on_missing_ticket_succeeds_without_effect() {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_status()
        .withf(|id, status, at| {
            id.get() == 42 && *status == TicketStatus::Resolved && *at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_, _, _| Ok(0));
    let service = make_service(repo);

    let request = UpdateTicketStatusRequest {
        actor: Some(tech()),
        ticket_id: "42".to_owned(),
        status: "resolved".to_owned(),
    };

    service
        .update_status(request)
        .await
        .expect("zero rows is still success");
}

#[rstest]
#[case(Role::Tech)]
#[case(Role::Admin)]
#[tokio::test]
async fn update_status_has_no_role_restriction(#[case] role: Role) {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_status()
        .times(1)
        .return_once(|_, _, _| Ok(1));
    let service = make_service(repo);

    let request = UpdateTicketStatusRequest {
        actor: Some(user(5, "someone", role)),
        ticket_id: "3".to_owned(),
        status: "in_progress".to_owned(),
    };
    service.update_status(request).await.expect("status updated");
}

#[rstest]
#[case("abc", "resolved", "ticket_id")]
#[case("", "resolved", "ticket_id")]
#[case("3", "Resolved", "status")]
#[case("3", "reopened", "status")]
#[tokio::test]
async fn update_status_rejects_invalid_input(
    #[case] ticket: &str,
    #[case] status: &str,
    #[case] field: &str,
) {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_status().times(0);
    let service = make_service(repo);

    let request = UpdateTicketStatusRequest {
        actor: Some(tech()),
        ticket_id: ticket.to_owned(),
        status: status.to_owned(),
    };
    let err = service.update_status(request).await.expect_err("invalid");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), "Invalid input.");
    assert_eq!(field_of(&err), Some(field));
}

#[tokio::test]
async fn update_status_requires_actor() {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_status().times(0);
    let service = make_service(repo);

    let request = UpdateTicketStatusRequest {
        actor: None,
        ticket_id: "3".to_owned(),
        status: "closed".to_owned(),
    };
    let err = service.update_status(request).await.expect_err("login required");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case("7")]
#[case("not-a-number")]
#[case("")]
#[case("-1")]
#[tokio::test]
async fn assign_by_non_admin_is_forbidden_whatever_the_ticket(#[case] ticket: &str) {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_assignee().times(0);
    let service = make_service(repo);

    let request = AssignTicketRequest {
        actor: Some(tech()),
        ticket_id: ticket.to_owned(),
        assigned_to: Some("2".to_owned()),
    };
    let err = service.assign(request).await.expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "Only admins can assign tickets.");
}

#[tokio::test]
async fn assign_without_actor_is_forbidden() {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_assignee().times(0);
    let service = make_service(repo);

    let request = AssignTicketRequest {
        actor: None,
        ticket_id: "7".to_owned(),
        assigned_to: None,
    };
    let err = service.assign(request).await.expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
#[case(Some("0"))]
#[tokio::test]
async fn assign_with_null_assignee_unassigns(#[case] assigned_to: Option<&str>) {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_assignee()
        .withf(|id, assignee, at| id.get() == 7 && assignee.is_none() && *at == fixture_timestamp())
        .times(1)
        .return_once(|_, _, _| Ok(1));
    let service = make_service(repo);

    let request = AssignTicketRequest {
        actor: Some(admin()),
        ticket_id: "7".to_owned(),
        assigned_to: assigned_to.map(str::to_owned),
    };
    service.assign(request).await.expect("unassigned");
}

#[tokio::test]
async fn assign_sets_assignee() {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_assignee()
        .withf(|id, assignee, _| id.get() == 7 && assignee.map(UserId::get) == Some(2))
        .times(1)
        .return_once(|_, _, _| Ok(1));
    let service = make_service(repo);

    let request = AssignTicketRequest {
        actor: Some(admin()),
        ticket_id: "7".to_owned(),
        assigned_to: Some("2".to_owned()),
    };
    service.assign(request).await.expect("assigned");
}

#[rstest]
#[case("abc", Some("2"), "Invalid ticket ID.", "ticket_id")]
#[case("0", Some("2"), "Invalid ticket ID.", "ticket_id")]
#[case("7", Some("two"), "Invalid input.", "assigned_to")]
#[case("7", Some("-2"), "Invalid input.", "assigned_to")]
#[tokio::test]
async fn assign_validates_after_authorization(
    #[case] ticket: &str,
    #[case] assigned_to: Option<&str>,
    #[case] message: &str,
    #[case] field: &str,
) {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_assignee().times(0);
    let service = make_service(repo);

    let request = AssignTicketRequest {
        actor: Some(admin()),
        ticket_id: ticket.to_owned(),
        assigned_to: assigned_to.map(str::to_owned),
    };
    let err = service.assign(request).await.expect_err("invalid");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), message);
    assert_eq!(field_of(&err), Some(field));
}

#[tokio::test]
async fn assign_on_missing_ticket_succeeds_without_effect() {
    let mut repo = MockTicketRepository::new();
    repo.expect_update_assignee()
        .times(1)
        .return_once(|_, _, _| Ok(0));
    let service = make_service(repo);

    let request = AssignTicketRequest {
        actor: Some(admin()),
        ticket_id: "999".to_owned(),
        assigned_to: Some("2".to_owned()),
    };
    service.assign(request).await.expect("no-op success");
}

#[rstest]
#[case(Some("resolved"), Some("2"), Some(TicketStatus::Resolved), Some(2))]
#[case(Some("Resolved"), Some("x"), None, None)]
#[case(None, Some(""), None, None)]
#[tokio::test]
async fn list_applies_valid_filters_and_ignores_invalid_ones(
    #[case] status: Option<&str>,
    #[case] assigned_to: Option<&str>,
    #[case] expected_status: Option<TicketStatus>,
    #[case] expected_assignee: Option<i64>,
) {
    let mut repo = MockTicketRepository::new();
    repo.expect_list()
        .withf(move |filter| {
            filter.status == expected_status
                && filter.assigned_to.map(UserId::get) == expected_assignee
        })
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let service = make_service(repo);

    let request = ListTicketsRequest {
        status: status.map(str::to_owned),
        assigned_to: assigned_to.map(str::to_owned),
    };
    let tickets = service.list(&tech(), request).await.expect("list");
    assert!(tickets.is_empty());
}

#[tokio::test]
async fn get_reports_missing_ticket_as_not_found() {
    let mut repo = MockTicketRepository::new();
    repo.expect_find_detail()
        .times(1)
        .return_once(|_| Ok(None));
    let service = make_service(repo);

    let err = service.get(&tech(), "42").await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Ticket not found.");
    assert_eq!(err.details(), Some(&json!({ "ticketId": 42 })));
}

#[tokio::test]
async fn get_rejects_invalid_identifier() {
    let mut repo = MockTicketRepository::new();
    repo.expect_find_detail().times(0);
    let service = make_service(repo);

    let err = service.get(&tech(), "abc").await.expect_err("invalid");
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}
