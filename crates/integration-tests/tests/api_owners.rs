//! Integration tests for owner management.
//!
//! These tests require:
//! - A running `PostgreSQL` database, migrated and seeded
//!   (`clinic-cli migrate && clinic-cli seed`)
//! - The server running (cargo run -p willowvale-server)
//!
//! Run with: cargo test -p willowvale-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use willowvale_integration_tests::{base_url, client, pool};

/// Test helper: a last name no seeded or leftover data will collide with.
fn unique_last_name() -> String {
    format!("Zz{}", Uuid::new_v4().simple())
}

/// Test helper: owner payload with the given last name.
fn owner_payload(last_name: &str) -> Value {
    json!({
        "first_name": "Test",
        "last_name": last_name,
        "address": "1 Test Lane",
        "city": "Madison",
        "telephone": "6085550000",
    })
}

/// Test helper: create an owner via the API and return its JSON.
async fn create_test_owner(client: &reqwest::Client, last_name: &str) -> Value {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/api/owners"))
        .json(&owner_payload(last_name))
        .send()
        .await
        .expect("Failed to create test owner");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse created owner")
}

/// Test helper: delete an owner via the API.
async fn delete_test_owner(client: &reqwest::Client, owner_id: i64) {
    let base_url = base_url();
    let _ = client
        .delete(format!("{base_url}/api/owners/{owner_id}"))
        .send()
        .await;
}

// ============================================================================
// Search & Pagination Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_prefix_search_davis_finds_both() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    // The seeded data set has Betty Davis and Harold Davis
    let resp = client
        .get(format!("{base_url}/api/owners?last_name=Davis"))
        .send()
        .await
        .expect("Failed to search owners");

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = resp.json().await.expect("Failed to parse search results");

    assert_eq!(page["total_count"], 2);
    assert_eq!(page["owners"].as_array().expect("owners array").len(), 2);
    for owner in page["owners"].as_array().expect("owners array") {
        assert_eq!(owner["last_name"], "Davis");
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_prefix_search_daviss_finds_none() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/owners?last_name=Daviss"))
        .send()
        .await
        .expect("Failed to search owners");

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = resp.json().await.expect("Failed to parse search results");

    assert_eq!(page["total_count"], 0);
    assert!(page["owners"].as_array().expect("owners array").is_empty());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_search_without_filter_returns_all() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/owners?size=100"))
        .send()
        .await
        .expect("Failed to list owners");

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = resp.json().await.expect("Failed to parse owner list");

    // At least the ten seeded owners
    assert!(page["total_count"].as_i64().expect("total_count") >= 10);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_pagination_is_one_based() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let first: Value = client
        .get(format!("{base_url}/api/owners?page=1&size=2"))
        .send()
        .await
        .expect("Failed to fetch page 1")
        .json()
        .await
        .expect("Failed to parse page 1");
    let second: Value = client
        .get(format!("{base_url}/api/owners?page=2&size=2"))
        .send()
        .await
        .expect("Failed to fetch page 2")
        .json()
        .await
        .expect("Failed to parse page 2");

    let first_ids: Vec<i64> = first["owners"]
        .as_array()
        .expect("owners array")
        .iter()
        .map(|o| o["id"].as_i64().expect("owner id"))
        .collect();
    let second_ids: Vec<i64> = second["owners"]
        .as_array()
        .expect("owners array")
        .iter()
        .map(|o| o["id"].as_i64().expect("owner id"))
        .collect();

    assert_eq!(first_ids.len(), 2);
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
}

// ============================================================================
// Save & Identity Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_create_assigns_positive_identity() {
    let client = client().expect("Failed to create HTTP client");
    let last_name = unique_last_name();

    let owner = create_test_owner(&client, &last_name).await;
    let owner_id = owner["id"].as_i64().expect("owner id");
    assert!(owner_id > 0);

    delete_test_owner(&client, owner_id).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_update_preserves_identity_and_persists_changes() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();
    let last_name = unique_last_name();

    let owner = create_test_owner(&client, &last_name).await;
    let owner_id = owner["id"].as_i64().expect("owner id");

    let mut updated = owner_payload(&last_name);
    updated["city"] = json!("Monona");
    let resp = client
        .put(format!("{base_url}/api/owners/{owner_id}"))
        .json(&updated)
        .send()
        .await
        .expect("Failed to update owner");

    assert_eq!(resp.status(), StatusCode::OK);
    let saved: Value = resp.json().await.expect("Failed to parse updated owner");
    assert_eq!(saved["id"].as_i64().expect("owner id"), owner_id);

    let fetched: Value = client
        .get(format!("{base_url}/api/owners/{owner_id}"))
        .send()
        .await
        .expect("Failed to fetch owner")
        .json()
        .await
        .expect("Failed to parse owner");
    assert_eq!(fetched["city"], "Monona");

    delete_test_owner(&client, owner_id).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_update_with_mismatched_id_is_rejected() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();
    let last_name = unique_last_name();

    let owner = create_test_owner(&client, &last_name).await;
    let owner_id = owner["id"].as_i64().expect("owner id");

    let mut payload = owner_payload(&last_name);
    payload["id"] = json!(owner_id + 1);
    let resp = client
        .put(format!("{base_url}/api/owners/{owner_id}"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    delete_test_owner(&client, owner_id).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_create_with_invalid_telephone_is_rejected() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let mut payload = owner_payload(&unique_last_name());
    payload["telephone"] = json!("608-555-1023");
    let resp = client
        .post(format!("{base_url}/api/owners"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    let errors = body["errors"].as_array().expect("errors array");
    assert!(errors.iter().any(|e| e["field"] == "Telephone"));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_missing_owner_returns_not_found() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/owners/999999"))
        .send()
        .await
        .expect("Failed to fetch owner");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Cascade Delete Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_delete_owner_cascades_to_pets_and_visits() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();
    let last_name = unique_last_name();

    let owner = create_test_owner(&client, &last_name).await;
    let owner_id = owner["id"].as_i64().expect("owner id");

    // Pick any existing pet type
    let types: Value = client
        .get(format!("{base_url}/api/pettypes"))
        .send()
        .await
        .expect("Failed to list pet types")
        .json()
        .await
        .expect("Failed to parse pet types");
    let type_id = types
        .as_array()
        .and_then(|t| t.first())
        .and_then(|t| t["id"].as_i64())
        .expect("at least one seeded pet type");

    // Add a pet and a visit to it
    let pet: Value = client
        .post(format!("{base_url}/api/owners/{owner_id}/pets"))
        .json(&json!({
            "name": "Cascade",
            "birth_date": "2020-01-01",
            "type_id": type_id,
        }))
        .send()
        .await
        .expect("Failed to add pet")
        .json()
        .await
        .expect("Failed to parse pet");
    let pet_id = pet["id"].as_i64().expect("pet id");

    let resp = client
        .post(format!(
            "{base_url}/api/owners/{owner_id}/pets/{pet_id}/visits"
        ))
        .json(&json!({ "description": "rabies shot" }))
        .send()
        .await
        .expect("Failed to add visit");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Delete the owner
    let resp = client
        .delete(format!("{base_url}/api/owners/{owner_id}"))
        .send()
        .await
        .expect("Failed to delete owner");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // The owner is gone from the API...
    let resp = client
        .get(format!("{base_url}/api/owners/{owner_id}"))
        .send()
        .await
        .expect("Failed to fetch owner");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ...and the pet and visit rows are gone from the store
    let pool = pool().await.expect("Failed to connect to test database");
    let pet_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pets WHERE id = $1")
        .bind(i32::try_from(pet_id).expect("pet id fits i32"))
        .fetch_one(&pool)
        .await
        .expect("Failed to count pets");
    let visit_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE pet_id = $1")
        .bind(i32::try_from(pet_id).expect("pet id fits i32"))
        .fetch_one(&pool)
        .await
        .expect("Failed to count visits");

    assert_eq!(pet_count, 0);
    assert_eq!(visit_count, 0);
}
