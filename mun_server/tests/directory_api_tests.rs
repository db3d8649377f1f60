mod common;

use mun_entities::derived_models::{ParticipantListView, PublicProfileView};
use mun_entities::prelude::{RecordFilter, Role};
use mun_entities::DirectoryService;
use sea_orm::prelude::Uuid;
use tracing_test::traced_test;
use assert_matches::assert_matches;

use crate::common::{Fixture, FixtureOptions};


async fn mock_fixture() -> Fixture {
    Fixture::new(FixtureOptions { mock_directory: true, ..Default::default() }).await
}

#[tokio::test]
#[traced_test]
async fn test_list_is_grouped_by_committee() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_and_token("ada@mun.test", "Ada").await;

    let mut response = fixture.get("/api/participants").await;
    assert_eq!(response.status(), 200);
    let view: ParticipantListView = response.json().await;

    assert_eq!(view.participants.len(), 31);
    assert!(!view.can_delete);
    assert_eq!(view.participants[0].committee.as_deref(), Some("eco-intermediate"));

    let last = view.participants.last().unwrap();
    assert_eq!(last.name, "Ada");
    assert_matches!(last.committee, None);

    let committees = view.participants.iter().filter_map(|p| p.committee.clone()).collect::<Vec<_>>();
    let mut sorted = committees.clone();
    sorted.sort();
    assert_eq!(committees, sorted);
}

#[tokio::test]
#[traced_test]
async fn test_list_offers_delete_to_executives() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_with_role("exec@mun.test", "Eve", "Executive").await;

    let mut response = fixture.get("/api/participants").await;
    let view: ParticipantListView = response.json().await;
    assert!(view.can_delete);
}

#[tokio::test]
#[traced_test]
async fn test_delegate_can_not_delete_participants() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_and_token("ada@mun.test", "Ada").await;

    let response = fixture.delete(&format!("/api/participants/{}", Uuid::from_u128(1005))).await;
    assert_eq!(response.status(), 403);

    let kept = fixture.state.directory().find_one(RecordFilter::Id(Uuid::from_u128(1005))).await.unwrap();
    assert_matches!(kept, Some(_));
}

#[tokio::test]
#[traced_test]
async fn test_seeded_profile_is_reachable_by_mock_id() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_and_token("ada@mun.test", "Ada").await;

    let mut response = fixture.get(&format!("/api/participants/{}", Uuid::from_u128(1000))).await;
    assert_eq!(response.status(), 200);
    let view: PublicProfileView = response.json().await;
    assert_eq!(view.email, "participant0@mun.test");
    assert_eq!(view.display_role, "Chair");
}

#[tokio::test]
#[traced_test]
async fn test_executive_deletes_participant() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_with_role("exec@mun.test", "Eve", "executive").await;
    let target = fixture.state.directory().find_one(RecordFilter::Email("participant5@mun.test".into())).await.unwrap().unwrap();
    let path = format!("/api/participants/{}", target.record.uuid);

    let response = fixture.delete(&path).await;
    assert_eq!(response.status(), 204);

    let response = fixture.get(&path).await;
    assert_eq!(response.status(), 404);

    let response = fixture.delete(&path).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_chair_can_not_delete_participants() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_with_role("chair@mun.test", "Cam", "chair").await;
    let target = fixture.state.directory().find_one(RecordFilter::Email("participant5@mun.test".into())).await.unwrap().unwrap();

    let response = fixture.delete(&format!("/api/participants/{}", target.record.uuid)).await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[traced_test]
async fn test_public_profile_marks_own_profile() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_and_token("ada@mun.test", "Ada").await;
    let own = fixture.state.directory().find_one(RecordFilter::Email("ada@mun.test".into())).await.unwrap().unwrap();
    let other = fixture.state.directory().find_one(RecordFilter::Email("participant0@mun.test".into())).await.unwrap().unwrap();

    let mut response = fixture.get(&format!("/api/participants/{}", own.record.uuid)).await;
    assert_eq!(response.status(), 200);
    let view: PublicProfileView = response.json().await;
    assert!(view.is_me);
    assert_eq!(view.display_role, "Delegate");

    let mut response = fixture.get(&format!("/api/participants/{}", other.record.uuid)).await;
    let view: PublicProfileView = response.json().await;
    assert!(!view.is_me);
    assert_eq!(view.display_role, Role::Chair.display_name());
    assert_eq!(view.committee.as_deref(), Some("ga-beginner"));
}

#[tokio::test]
#[traced_test]
async fn test_unknown_profile_is_not_found() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_and_token("ada@mun.test", "Ada").await;

    let response = fixture.get(&format!("/api/participants/{}", Uuid::from_u128(1))).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_delete_gate_normalizes_stored_role_label() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_with_role("exec@mun.test", "Eve", "  EXECUTIVE ").await;

    let response = fixture.delete(&format!("/api/participants/{}", Uuid::from_u128(1010))).await;
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[traced_test]
async fn test_delete_gate_denies_unknown_role_label() {
    let mut fixture = mock_fixture().await;
    fixture.create_user_with_role("press@mun.test", "Pat", "Press").await;

    let response = fixture.delete(&format!("/api/participants/{}", Uuid::from_u128(1010))).await;
    assert_eq!(response.status(), 403);
}
