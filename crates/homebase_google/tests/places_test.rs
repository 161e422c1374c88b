//! Places lookups against a mock Maps server.

use homebase_config::{ApiKey, PlacesSettings};
use homebase_google::{PlaceInfo, PlacesClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIND: &str = "/maps/api/place/findplacefromtext/json";
const DETAILS: &str = "/maps/api/place/details/json";
const DISTANCE: &str = "/maps/api/distancematrix/json";

fn client_for(server: &MockServer) -> anyhow::Result<PlacesClient> {
    let settings = PlacesSettings {
        base_url: server.uri(),
        ..PlacesSettings::default()
    };
    Ok(PlacesClient::new(ApiKey::new("places-key"), &settings)?)
}

async fn mount_found(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(FIND))
        .and(query_param("input", "Powell's Books 1005 W Burnside St"))
        .and(query_param("inputtype", "textquery"))
        .and(query_param("key", "places-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "candidates": [{"place_id": "abc123"}]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_lookup_fills_every_field() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_found(&server).await;
    Mock::given(method("GET"))
        .and(path(DETAILS))
        .and(query_param("place_id", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {"photos": [{"photo_reference": "ref-1"}]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DISTANCE))
        .and(query_param("origins", "1 Home St"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "rows": [{"elements": [{
                "status": "OK",
                "distance": {"text": "3.2 mi", "value": 5150},
                "duration": {"text": "12 mins", "value": 720}
            }]}]
        })))
        .mount(&server)
        .await;

    let info = client_for(&server)?
        .lookup("1005 W Burnside St", "Powell's Books", "1 Home St")
        .await;

    assert_eq!(info.place_id.as_deref(), Some("abc123"));
    assert_eq!(
        info.maps_link.as_deref(),
        Some("https://www.google.com/maps/place/?q=place_id:abc123")
    );
    assert_eq!(
        info.photo_url,
        Some(format!(
            "{}/maps/api/place/photo?maxwidth=400&photoreference=ref-1&key=places-key",
            server.uri()
        ))
    );
    assert_eq!(info.distance.as_deref(), Some("3.2 mi"));
    assert_eq!(info.duration.as_deref(), Some("12 mins"));
    Ok(())
}

#[tokio::test]
async fn no_candidates_is_no_place_found() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FIND))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "candidates": []
        })))
        .mount(&server)
        .await;

    let info = client_for(&server)?.lookup("nowhere", "nothing", "home").await;

    assert_eq!(info, PlaceInfo::failed("No place found"));
    Ok(())
}

#[tokio::test]
async fn search_status_error_is_reported() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FIND))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "candidates": []
        })))
        .mount(&server)
        .await;

    let info = client_for(&server)?.lookup("a", "b", "c").await;

    assert_eq!(info.distance.as_deref(), Some("API error: REQUEST_DENIED"));
    assert!(info.place_id.is_none());
    Ok(())
}

#[tokio::test]
async fn search_without_status_reports_none() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FIND))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let info = client_for(&server)?.lookup("a", "b", "c").await;

    assert_eq!(info, PlaceInfo::failed("API error: None"));
    Ok(())
}

#[tokio::test]
async fn photo_reference_is_percent_encoded() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_found(&server).await;
    Mock::given(method("GET"))
        .and(path(DETAILS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {"photos": [{"photo_reference": "ref/with+plus="}]}
        })))
        .mount(&server)
        .await;

    let info = client_for(&server)?
        .lookup("1005 W Burnside St", "Powell's Books", "1 Home St")
        .await;

    assert_eq!(
        info.photo_url,
        Some(format!(
            "{}/maps/api/place/photo?maxwidth=400&photoreference=ref%2Fwith%2Bplus%3D&key=places-key",
            server.uri()
        ))
    );
    Ok(())
}

#[tokio::test]
async fn search_garbage_is_invalid_json() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FIND))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let info = client_for(&server)?.lookup("a", "b", "c").await;

    assert_eq!(info, PlaceInfo::failed("Invalid JSON response"));
    Ok(())
}

#[tokio::test]
async fn search_http_failure_is_request_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FIND))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let info = client_for(&server)?.lookup("a", "b", "c").await;

    let distance = info.distance.unwrap_or_default();
    assert!(distance.starts_with("Request error: "), "{}", distance);
    assert!(!distance.contains("places-key"));
    Ok(())
}

#[tokio::test]
async fn partial_success_without_photo_or_route() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_found(&server).await;
    Mock::given(method("GET"))
        .and(path(DETAILS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DISTANCE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]
        })))
        .mount(&server)
        .await;

    let info = client_for(&server)?
        .lookup("1005 W Burnside St", "Powell's Books", "1 Home St")
        .await;

    assert_eq!(info.place_id.as_deref(), Some("abc123"));
    assert!(info.photo_url.is_none());
    assert_eq!(info.distance.as_deref(), Some("No route found"));
    assert_eq!(info.duration.as_deref(), Some("No route found"));
    Ok(())
}

#[tokio::test]
async fn distance_status_error_leaves_duration_empty() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_found(&server).await;
    Mock::given(method("GET"))
        .and(path(DETAILS))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DISTANCE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "rows": []
        })))
        .mount(&server)
        .await;

    let info = client_for(&server)?
        .lookup("1005 W Burnside St", "Powell's Books", "1 Home St")
        .await;

    assert!(info.photo_url.is_none());
    assert_eq!(info.distance.as_deref(), Some("Distance API error: OVER_QUERY_LIMIT"));
    assert!(info.duration.is_none());
    Ok(())
}

#[tokio::test]
async fn serialized_keys_match_client_contract() -> anyhow::Result<()> {
    let info = PlaceInfo {
        place_id: Some("abc".into()),
        maps_link: Some("link".into()),
        photo_url: None,
        distance: Some("1 mi".into()),
        duration: Some("3 mins".into()),
    };

    let value = serde_json::to_value(&info)?;
    assert_eq!(
        value,
        json!({
            "placeID": "abc",
            "mapsLink": "link",
            "photoURL": null,
            "distance": "1 mi",
            "duration": "3 mins"
        })
    );
    Ok(())
}
