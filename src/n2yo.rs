use std::time::Duration;

use futures::future::try_join_all;
use serde::{de::DeserializeOwned, Deserialize};
use ureq::serde_json::{self, Value};

use crate::{
    error::ApiError,
    satellite::{Category, SatelliteInfo, SatelliteTrack},
};

pub const DEFAULT_BASE_URL: &str = "https://api.n2yo.com/rest/v1/satellite";

/// Ground station the requests are made for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude above sea level in meters
    pub altitude: f64,
}

#[derive(Deserialize)]
struct AboveResponse {
    #[serde(default)]
    above: Vec<SatelliteInfo>,
}

/// Blocking client for the N2YO REST API.
#[derive(Clone)]
pub struct Client {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Lists satellites within `radius` degrees above the observer.
    pub fn above(
        &self,
        observer: Observer,
        radius: u32,
        category: Category,
    ) -> Result<Vec<SatelliteInfo>, ApiError> {
        let response: AboveResponse = self.get(&format!(
            "above/{}/{}/{}/{}/{}",
            observer.latitude,
            observer.longitude,
            observer.altitude,
            radius,
            category.id()
        ))?;
        Ok(response.above)
    }

    /// Fetches one position per second for the next `seconds` seconds.
    pub fn positions(
        &self,
        id: u64,
        observer: Observer,
        seconds: u64,
    ) -> Result<SatelliteTrack, ApiError> {
        self.get(&format!(
            "positions/{}/{}/{}/{}/{}",
            id, observer.latitude, observer.longitude, observer.altitude, seconds
        ))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        log::debug!("GET {}/{}", self.base_url, path);
        let url = format!("{}/{}/&apiKey={}", self.base_url, path, self.api_key);
        let body: Value = self.agent.get(&url).call()?.into_json()?;
        parse_response(body)
    }
}

/// Decodes an N2YO response body, turning `{"error": ..}` bodies into errors.
pub fn parse_response<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(ApiError::Api(message.to_string()));
    }
    Ok(serde_json::from_value(body)?)
}

/// Runs the "above" lookup off the event loop.
pub async fn fetch_above(
    client: Client,
    observer: Observer,
    radius: u32,
    category: Category,
) -> Result<Vec<SatelliteInfo>, ApiError> {
    tokio::task::spawn_blocking(move || client.above(observer, radius, category)).await?
}

/// Fetches the tracks of all `ids` in parallel.
///
/// Fails as a whole if any single request fails. The result keeps the order
/// of `ids`.
pub async fn fetch_tracks(
    client: Client,
    ids: Vec<u64>,
    observer: Observer,
    seconds: u64,
) -> Result<Vec<SatelliteTrack>, ApiError> {
    let requests = ids.into_iter().map(|id| {
        let client = client.clone();
        async move {
            tokio::task::spawn_blocking(move || client.positions(id, observer, seconds)).await?
        }
    });
    try_join_all(requests).await
}
