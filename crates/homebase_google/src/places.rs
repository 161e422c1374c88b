//! Google Places lookup: place id, map link, photo and commute.

use homebase_config::{ApiKey, HomebaseConfig, PlacesSettings};
use homebase_error::{HomebaseResult, HttpError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

const UNAVAILABLE: &str = "Unavailable";
const NO_ROUTE: &str = "No route found";

/// Everything known about one place.
///
/// Each field is filled independently. When the place search itself fails,
/// `distance` carries the reason and the other fields are empty.
///
/// # Examples
///
/// ```
/// use homebase_google::PlaceInfo;
///
/// let info = PlaceInfo::failed("No place found");
/// let json = serde_json::to_value(&info).unwrap();
/// assert_eq!(json["distance"], "No place found");
/// assert!(json["placeID"].is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceInfo {
    /// Google place id
    #[serde(rename = "placeID")]
    pub place_id: Option<String>,
    /// Google Maps link for the place
    #[serde(rename = "mapsLink")]
    pub maps_link: Option<String>,
    /// URL of the first photo, if the place has one
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Commute distance text, or why it is unknown
    pub distance: Option<String>,
    /// Commute duration text
    pub duration: Option<String>,
}

impl PlaceInfo {
    /// A record for a search that found nothing usable.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            distance: Some(reason.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    candidates: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    #[serde(default)]
    photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DistanceResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    rows: Vec<DistanceRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceRow {
    #[serde(default)]
    elements: Vec<DistanceElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceElement {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    distance: Option<TextValue>,
    #[serde(default)]
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    #[serde(default)]
    text: Option<String>,
}

/// Why a Places sub-call produced nothing.
#[derive(Debug)]
enum FetchError {
    Request(String),
    InvalidJson,
}

/// Places API client.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    units: String,
    photo_max_width: u32,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// Creates a client from an already-resolved key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: ApiKey, settings: &PlacesSettings) -> HomebaseResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            units: settings.units.clone(),
            photo_max_width: settings.photo_max_width,
        })
    }

    /// Resolves the key from configuration, then creates the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is missing.
    pub fn from_config(config: &HomebaseConfig) -> HomebaseResult<Self> {
        let api_key = config.places.api_key()?;
        Self::new(api_key, &config.places)
    }

    /// Look up a place and its commute from `home_address`.
    ///
    /// Searches for `"{place} {address}"`, then fetches a photo and the
    /// distance matrix entry. Failures of the later calls only blank or
    /// annotate their own fields.
    #[instrument(skip(self, home_address))]
    pub async fn lookup(&self, address: &str, place: &str, home_address: &str) -> PlaceInfo {
        let place_id = match self.find_place(address, place).await {
            Ok(place_id) => place_id,
            Err(info) => return info,
        };

        let maps_link = format!("https://www.google.com/maps/place/?q=place_id:{}", place_id);
        let photo_url = self.photo_url(&place_id).await;
        let (distance, duration) = self.distance(home_address, address).await;

        PlaceInfo {
            place_id: Some(place_id),
            maps_link: Some(maps_link),
            photo_url,
            distance,
            duration,
        }
    }

    async fn find_place(&self, address: &str, place: &str) -> Result<String, PlaceInfo> {
        let input = format!("{} {}", place, address);
        let data: FindPlaceResponse = self
            .get_json(
                "/maps/api/place/findplacefromtext/json",
                &[
                    ("input", input.as_str()),
                    ("inputtype", "textquery"),
                    ("fields", "place_id"),
                ],
            )
            .await
            .map_err(|e| match e {
                FetchError::Request(msg) => PlaceInfo::failed(format!("Request error: {}", msg)),
                FetchError::InvalidJson => PlaceInfo::failed("Invalid JSON response"),
            })?;

        let status = status_text(data.status.as_deref());
        if status != "OK" {
            warn!(status = %status, "Place search returned error status");
            return Err(PlaceInfo::failed(format!("API error: {}", status)));
        }

        data.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.place_id)
            .ok_or_else(|| PlaceInfo::failed("No place found"))
    }

    async fn photo_url(&self, place_id: &str) -> Option<String> {
        let details: DetailsResponse = match self
            .get_json(
                "/maps/api/place/details/json",
                &[("place_id", place_id), ("fields", "photo")],
            )
            .await
        {
            Ok(details) => details,
            Err(e) => {
                debug!(error = ?e, "No photo for place");
                return None;
            }
        };

        let reference = details
            .result?
            .photos
            .into_iter()
            .next()?
            .photo_reference?;

        let max_width = self.photo_max_width.to_string();
        match reqwest::Url::parse_with_params(
            &format!("{}/maps/api/place/photo", self.base_url),
            &[
                ("maxwidth", max_width.as_str()),
                ("photoreference", reference.as_str()),
                ("key", self.api_key.expose()),
            ],
        ) {
            Ok(url) => Some(url.into()),
            Err(e) => {
                debug!(error = %e, "Invalid photo URL");
                None
            }
        }
    }

    async fn distance(&self, origin: &str, destination: &str) -> (Option<String>, Option<String>) {
        let data: DistanceResponse = match self
            .get_json(
                "/maps/api/distancematrix/json",
                &[
                    ("origins", origin),
                    ("destinations", destination),
                    ("units", self.units.as_str()),
                ],
            )
            .await
        {
            Ok(data) => data,
            Err(FetchError::Request(msg)) => {
                return (Some(format!("Distance request error: {}", msg)), None);
            }
            Err(FetchError::InvalidJson) => return (Some("Invalid distance JSON".to_string()), None),
        };

        let status = status_text(data.status.as_deref());
        if status != "OK" {
            return (Some(format!("Distance API error: {}", status)), None);
        }

        let element = data
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .filter(|element| element.status.as_deref() == Some("OK"));

        match element {
            Some(element) => (
                Some(text_or_unavailable(element.distance)),
                Some(text_or_unavailable(element.duration)),
            ),
            None => (Some(NO_ROUTE.to_string()), Some(NO_ROUTE.to_string())),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.expose())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, path, "Places response was not valid JSON");
            FetchError::InvalidJson
        })
    }
}

/// A missing status renders as "None".
fn status_text(status: Option<&str>) -> &str {
    status.unwrap_or("None")
}

fn text_or_unavailable(value: Option<TextValue>) -> String {
    value
        .and_then(|value| value.text)
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}
