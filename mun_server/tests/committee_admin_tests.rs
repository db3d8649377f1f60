mod common;

use mun_entities::prelude::{ParticipantProfile, RecordFilter};
use mun_entities::DirectoryService;
use mun_server::admin::AssignmentRequest;
use sea_orm::prelude::Uuid;
use serde_json::Value;
use tracing_test::traced_test;
use assert_matches::assert_matches;

use crate::common::{Fixture, FixtureOptions};


#[tokio::test]
#[traced_test]
async fn test_committee_list_is_public_and_ordered() {
    let mut fixture = Fixture::default().await;
    let mut response = fixture.get("/api/committees").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let slugs = body["committees"].as_array().unwrap().iter().map(|c| c["slug"].as_str().unwrap().to_string()).collect::<Vec<_>>();
    assert_eq!(slugs, vec!["ga-beginner", "eco-intermediate", "sc-advanced"]);

    let response = fixture.get("/api/committees/sc-advanced").await;
    assert_eq!(response.status(), 200);
    let response = fixture.get("/api/committees/unsc").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_session_for_chair_resolves_free_text_committee() {
    let mut fixture = Fixture::default().await;
    fixture.create_user_with_role("chair@mun.test", "Cam", "Chair").await;
    fixture.state.directory().upsert(
        mun_entities::prelude::ParticipantPatch {
            committee: Some(Some("Security Council".into())),
            country: Some(Some("Kenya".into())),
            ..mun_entities::prelude::ParticipantPatch::with_email("chair@mun.test")
        },
        mun_entities::prelude::ConflictKey::Email,
    ).await.unwrap();

    let mut response = fixture.get("/api/session").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["committee"]["slug"], "sc-advanced");
    assert_eq!(body["role"], "chair");
    assert_eq!(body["delegation"], "Kenya");
    assert_eq!(body["can_moderate"], true);
}

#[tokio::test]
#[traced_test]
async fn test_session_for_new_delegate_uses_defaults() {
    let mut fixture = Fixture::default().await;
    fixture.create_user_and_token("ada@mun.test", "Ada").await;

    let mut response = fixture.get("/api/session").await;
    let body: Value = response.json().await;
    assert_eq!(body["committee"]["slug"], "ga-beginner");
    assert_eq!(body["role"], "delegate");
    assert_eq!(body["delegation"], Value::Null);
    assert_eq!(body["can_moderate"], false);
}

#[tokio::test]
#[traced_test]
async fn test_admin_dashboard_access_by_role() {
    for (role, expected) in [("executive", 200), ("developer", 200), ("admin", 403), ("chair", 403), ("delegate", 403)] {
        let mut fixture = Fixture::default().await;
        fixture.create_user_with_role("user@mun.test", "Uma", role).await;
        let response = fixture.get("/api/admin").await;
        assert_eq!(response.status(), expected, "{}", role);
    }
}

#[tokio::test]
#[traced_test]
async fn test_admin_dashboard_shows_viewer() {
    let mut fixture = Fixture::default().await;
    fixture.create_user_with_role("exec@mun.test", "Eve Adams", "EXECUTIVE").await;

    let mut response = fixture.get("/api/admin").await;
    let body: Value = response.json().await;
    assert_eq!(body["name"], "Eve Adams");
    assert_eq!(body["role"], "executive");
    assert_eq!(body["capabilities"].as_array().unwrap().len(), 3);
}

#[tokio::test]
#[traced_test]
async fn test_assignment_stores_committee_slug() {
    let mut fixture = Fixture::new(FixtureOptions { mock_directory: true, ..Default::default() }).await;
    fixture.create_user_with_role("exec@mun.test", "Eve", "executive").await;
    let target = fixture.state.directory().find_one(RecordFilter::Email("participant7@mun.test".into())).await.unwrap().unwrap();

    let mut response = fixture.put_json(
        &format!("/api/admin/participants/{}/assignment", target.record.uuid),
        AssignmentRequest {
            committee: Some("Security Council".into()),
            country: Some("  Chile ".into()),
        }
    ).await;
    assert_eq!(response.status(), 200);
    let profile: ParticipantProfile = response.json().await;
    assert_eq!(profile.record.committee.as_deref(), Some("sc-advanced"));
    assert_eq!(profile.record.country.as_deref(), Some("Chile"));
    assert_eq!(profile.record.uuid, target.record.uuid);
}

#[tokio::test]
#[traced_test]
async fn test_assignment_with_blank_committee_clears_it() {
    let mut fixture = Fixture::new(FixtureOptions { mock_directory: true, ..Default::default() }).await;
    fixture.create_user_with_role("dev@mun.test", "Dev", "developer").await;
    let target = fixture.state.directory().find_one(RecordFilter::Email("participant7@mun.test".into())).await.unwrap().unwrap();

    let mut response = fixture.put_json(
        &format!("/api/admin/participants/{}/assignment", target.record.uuid),
        AssignmentRequest { committee: Some(" ".into()), country: None }
    ).await;
    let profile: ParticipantProfile = response.json().await;
    assert_matches!(profile.record.committee, None);
    assert_matches!(profile.record.country, None);
}

#[tokio::test]
#[traced_test]
async fn test_assignment_requires_admin_area() {
    let mut fixture = Fixture::new(FixtureOptions { mock_directory: true, ..Default::default() }).await;
    fixture.create_user_with_role("admin@mun.test", "Al", "admin").await;

    let response = fixture.put_json(
        &format!("/api/admin/participants/{}/assignment", Uuid::from_u128(1003)),
        AssignmentRequest { committee: Some("Security Council".into()), country: None }
    ).await;
    assert_eq!(response.status(), 403);

    let unchanged = fixture.state.directory().find_one(RecordFilter::Id(Uuid::from_u128(1003))).await.unwrap().unwrap();
    assert_eq!(unchanged.record.committee.as_deref(), Some("ga-beginner"));
}

#[tokio::test]
#[traced_test]
async fn test_assignment_of_unknown_participant_is_not_found() {
    let mut fixture = Fixture::default().await;
    fixture.create_user_with_role("exec@mun.test", "Eve", "executive").await;

    let response = fixture.put_json(
        &format!("/api/admin/participants/{}/assignment", Uuid::from_u128(1)),
        AssignmentRequest::default()
    ).await;
    assert_eq!(response.status(), 404);
}
