//! Integration tests for the read-only vet and pet type endpoints.
//!
//! These tests require a running server and a migrated, seeded database.
//!
//! Run with: cargo test -p willowvale-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use willowvale_integration_tests::{base_url, client};

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_list_vets_includes_specialties() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/vets"))
        .send()
        .await
        .expect("Failed to list vets");

    assert_eq!(resp.status(), StatusCode::OK);
    let vets: Value = resp.json().await.expect("Failed to parse vets");
    let vets = vets.as_array().expect("vets array");
    assert!(vets.len() >= 6);

    // Linda Douglas practices surgery and dentistry in the seeded set
    let douglas = vets
        .iter()
        .find(|v| v["last_name"] == "Douglas")
        .expect("seeded vet Douglas");
    let specialties: Vec<&str> = douglas["specialties"]
        .as_array()
        .expect("specialties array")
        .iter()
        .map(|s| s["name"].as_str().expect("specialty name"))
        .collect();
    assert_eq!(specialties, vec!["dentistry", "surgery"]);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_vets_are_ordered_by_last_name() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let vets: Value = client
        .get(format!("{base_url}/api/vets"))
        .send()
        .await
        .expect("Failed to list vets")
        .json()
        .await
        .expect("Failed to parse vets");

    let last_names: Vec<&str> = vets
        .as_array()
        .expect("vets array")
        .iter()
        .map(|v| v["last_name"].as_str().expect("last name"))
        .collect();
    let mut sorted = last_names.clone();
    sorted.sort_unstable();
    assert_eq!(last_names, sorted);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_missing_vet_returns_not_found() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/vets/999999"))
        .send()
        .await
        .expect("Failed to fetch vet");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_list_pet_types_ordered_by_name() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/pettypes"))
        .send()
        .await
        .expect("Failed to list pet types");

    assert_eq!(resp.status(), StatusCode::OK);
    let types: Value = resp.json().await.expect("Failed to parse pet types");
    let names: Vec<&str> = types
        .as_array()
        .expect("types array")
        .iter()
        .map(|t| t["name"].as_str().expect("type name"))
        .collect();

    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    for expected in ["bird", "cat", "dog", "hamster", "lizard", "snake"] {
        assert!(names.contains(&expected));
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_missing_pet_type_returns_not_found() {
    let client = client().expect("Failed to create HTTP client");
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/pettypes/999999"))
        .send()
        .await
        .expect("Failed to fetch pet type");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
