//! E2E tests using the mock Hoopla server.
//!
//! These tests exercise full workflows against the mock server, following
//! links from the API root rather than hitting individual endpoints.

#![cfg(feature = "test-server")]

use hoopla::mock_server::{Fixtures, MockOwner, MockServer, MockState};
use hoopla::{
    Delete, HasOwner, HooplaClient, HooplaError, Owner, OwnerRef, Reload, Resource, Save,
};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Authentication Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_authenticate_then_browse() {
    let state = Fixtures::default_scenario()
        .with_credentials("id", "secret")
        .with_required_token("issued");
    let server = MockServer::with_state(state).await;

    let client = HooplaClient::authenticate("id", "secret", server.url())
        .await
        .expect("Failed to authenticate");
    let root = client.connect().await.expect("Failed to load root");

    let users = root.users().await.expect("Failed to list users");
    assert_eq!(users.len(), 2);

    server.shutdown().await;
}

// =============================================================================
// Metric Value Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_record_generic_value_workflow() {
    let server = MockServer::start().await;
    let client = HooplaClient::new("test-token", server.url()).unwrap();
    let root = client.connect().await.unwrap();

    // Step 1: Find the metric through the root links
    let metric = root
        .find_metric_by_name(Fixtures::REVENUE_METRIC)
        .await
        .unwrap()
        .expect("Revenue should exist");
    assert!(metric.values().await.unwrap().is_empty());

    // Step 2: Create a value for an external owner
    let mut value = metric.new_value().unwrap();
    value.set_value(1250.0);
    value.set_owner("acme-corp");
    value.save().await.expect("Failed to create value");
    assert!(value.is_persistent());

    // Step 3: It is listed for that owner and resolves without a request
    let listed = metric
        .values_by_owner(&OwnerRef::generic("acme-corp"))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].value(), Some(1250.0));
    assert_eq!(listed[0].href(), value.href());

    let owner = listed[0].resolve_owner().await.unwrap();
    assert!(matches!(owner, Some(Owner::Generic(ref token)) if token == "acme-corp"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_update_and_delete_value_workflow() {
    let server = MockServer::start().await;
    let client = HooplaClient::new("test-token", server.url()).unwrap();
    let root = client.connect().await.unwrap();

    let ada = root
        .find_user_by_email(Fixtures::ADA_EMAIL)
        .await
        .unwrap()
        .expect("Ada should exist");
    let ada_ref = OwnerRef::try_from(&ada).unwrap();

    let metric = root
        .find_metric_by_name(Fixtures::DEALS_METRIC)
        .await
        .unwrap()
        .unwrap();

    // Update Ada's value
    let mut value = metric.values_by_owner(&ada_ref).await.unwrap().remove(0);
    assert_eq!(value.value(), Some(12.0));
    value.set_value(13.0);
    value.save().await.expect("Failed to update value");

    value.reload().await.unwrap();
    assert_eq!(value.value(), Some(13.0));
    assert!(value.updated_at().is_some());

    // The owner resolves to the user it references
    match value.resolve_owner().await.unwrap() {
        Some(Owner::User(user)) => assert_eq!(user.email(), Some(Fixtures::ADA_EMAIL)),
        other => panic!("Expected user owner, got {other:?}"),
    }

    // Delete it; reloading afterwards is a client error
    value.delete().await.expect("Failed to delete value");
    let err = value.reload().await.unwrap_err();
    assert!(matches!(err, HooplaError::ClientRequest(ref f) if f.status == 404));

    assert!(metric.values_by_owner(&ada_ref).await.unwrap().is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_team_owner_resolves_to_team() {
    let server = MockServer::start().await;
    let client = HooplaClient::new("test-token", server.url()).unwrap();
    let root = client.connect().await.unwrap();

    let team = root
        .find_team_by_name(Fixtures::TEAM_NAME)
        .await
        .unwrap()
        .expect("team should exist");
    let metric = root
        .find_metric_by_name(Fixtures::DEALS_METRIC)
        .await
        .unwrap()
        .unwrap();

    let values = metric
        .values_by_owner(&OwnerRef::try_from(&team).unwrap())
        .await
        .unwrap();
    assert_eq!(values.len(), 1);

    let owner = values[0].resolve_owner().await.unwrap().unwrap();
    assert_eq!(owner.to_string(), Fixtures::TEAM_NAME);

    server.shutdown().await;
}

// =============================================================================
// Newsflash Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_post_newsflash_event_workflow() {
    let server = MockServer::start().await;
    let client = HooplaClient::new("test-token", server.url()).unwrap();
    let root = client.connect().await.unwrap();

    let newsflash = root
        .find_newsflash_by_name(Fixtures::NEWSFLASH_NAME)
        .await
        .unwrap()
        .expect("newsflash should exist");
    let ada = root
        .find_user_by_email(Fixtures::ADA_EMAIL)
        .await
        .unwrap()
        .unwrap();
    let grace = root
        .find_user_by_email(Fixtures::GRACE_EMAIL)
        .await
        .unwrap()
        .unwrap();

    let mut event = newsflash.new_event().unwrap();
    event.set_title("New record");
    event.set_message("Ada closed 12 deals");
    event.set_owner(OwnerRef::try_from(&ada).unwrap());
    event.set_recipients([&ada, &grace]).unwrap();
    event.save().await.expect("Failed to post event");

    assert!(event.is_persistent());
    event.reload().await.unwrap();
    assert_eq!(event.title(), Some("New record"));
    assert_eq!(event.recipients().unwrap().len(), 2);

    let state = server.state();
    assert_eq!(state.read().await.newsflash_events.len(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_newsflash_from_root() {
    let server = MockServer::start_empty().await;
    let client = HooplaClient::new("test-token", server.url()).unwrap();
    let root = client.connect().await.unwrap();

    let mut newsflash = root.new_newsflash().unwrap();
    newsflash.set("name", "Launches");
    newsflash.save().await.expect("Failed to create newsflash");

    let found = root
        .find_newsflash_by_name("Launches")
        .await
        .unwrap()
        .expect("created newsflash should be listed");
    assert_eq!(found.href(), newsflash.href());

    server.shutdown().await;
}

// =============================================================================
// State Modification Tests
// =============================================================================

#[tokio::test]
async fn test_modify_state_during_test() {
    let server = MockServer::start_empty().await;
    let client = HooplaClient::new("test-token", server.url()).unwrap();
    let root = client.connect().await.unwrap();

    assert!(root.metrics().await.unwrap().is_empty());

    // Add a metric with a value directly to the state
    {
        let state = server.state();
        let mut state = state.write().await;
        let updated = std::mem::take(&mut *state)
            .with_metric("Calls", "number")
            .with_metric_value("Calls", MockOwner::Generic("dialer".to_string()), 40.0);
        *state = updated;
    }

    let metric = root.find_metric_by_name("Calls").await.unwrap().unwrap();
    let values = metric.values().await.unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].metric_name(), Some("Calls"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_custom_state() {
    let state = MockState::new().with_user("Linus", "Torvalds", "linus@example.com");
    let server = MockServer::with_state(state).await;
    let client = HooplaClient::new("test-token", server.url()).unwrap();

    let root = client.connect().await.unwrap();
    let users = root.users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].display_name(), "Linus Torvalds");
    assert!(root.find_team_by_name("anything").await.unwrap().is_none());

    server.shutdown().await;
}
