use reqwest::{blocking::Client, Url};
use std::time::Duration;
use tracing::debug;

use crate::geo::Coordinate;

use super::error::DirectionsError;
use super::parser::{parse_directions_response, parse_error_body};
use super::response::DirectionsResponse;
use super::{DirectionsProvider, RouteOption};

/// Blocking HTTP client for the directions proxy.
#[derive(Debug, Clone)]
pub struct HttpDirectionsClient {
    client: Client,
    base_url: String,
}

impl HttpDirectionsClient {
    /// Create a client for the proxy at `base_url` (e.g. `http://localhost:3003`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DirectionsError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/api/directions?start={lng},{lat}&goal={lng},{lat}&option={option}`.
    pub fn request_url(
        &self,
        start: Coordinate,
        end: Coordinate,
        option: RouteOption,
    ) -> Result<Url, DirectionsError> {
        let raw = format!(
            "{}/api/directions?start={},{}&goal={},{}&option={}",
            self.base_url, start.lng, start.lat, end.lng, end.lat, option
        );
        Url::parse(&raw).map_err(|err| DirectionsError::InvalidUrl(err.to_string()))
    }
}

impl DirectionsProvider for HttpDirectionsClient {
    fn fetch(
        &self,
        start: Coordinate,
        end: Coordinate,
        option: RouteOption,
    ) -> Result<Vec<Coordinate>, DirectionsError> {
        let url = self.request_url(start, end, option)?;
        debug!(%url, "requesting directions");

        let response = self.client.get(url).send().map_err(DirectionsError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }

        let parsed: DirectionsResponse = response.json().map_err(DirectionsError::Json)?;
        parse_directions_response(parsed, option)
    }
}
