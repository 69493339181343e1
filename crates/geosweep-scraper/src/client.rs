//! HTTP client for the location-search and place-search endpoints.

use std::time::Duration;

use geosweep_core::{AppConfig, Credentials, LocationRecord, QueryPoint};
use reqwest::Client;
use serde_json::Value;

use crate::error::ScraperError;

/// HTTP client for the location-search endpoints.
///
/// Every request carries the caller's cookie header verbatim. The client
/// never retries: a failed request surfaces as a typed [`ScraperError`] and
/// callers decide whether that is fatal.
pub struct LocationClient {
    client: Client,
    base_url: reqwest::Url,
}

impl LocationClient {
    /// Creates a `LocationClient` with a fixed per-request timeout.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute http(s) URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the base URL, timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// See [`LocationClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Queries `location_search` for places near `point`.
    ///
    /// A JSON object without a `venues` field yields an empty list. Every venue
    /// that is a JSON object is returned unchanged; other entries are skipped.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on connection failure or timeout.
    /// - [`ScraperError::RateLimited`] on HTTP 429.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Deserialize`] if the body is not JSON (typically a
    ///   login page served for an invalid cookie).
    /// - [`ScraperError::UnexpectedShape`] if the body is not a JSON object or
    ///   `venues` is not an array.
    pub async fn fetch_locations(
        &self,
        point: QueryPoint,
        credentials: &Credentials,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        let url = self.location_search_url(point);
        let JsonBody { url, value } = self.get_json(url, Some(credentials)).await?;

        let Value::Object(mut object) = value else {
            return Err(ScraperError::UnexpectedShape {
                url,
                reason: "response is not a JSON object".to_owned(),
            });
        };

        match object.remove("venues") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(venues)) => Ok(decode_records(venues)),
            Some(_) => Err(ScraperError::UnexpectedShape {
                url,
                reason: "\"venues\" is not an array".to_owned(),
            }),
        }
    }

    /// Free-text place search through `web/search/topsearch`.
    ///
    /// Returns the `location` object of every entry in `places`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LocationClient::fetch_locations`], with
    /// `places` in place of `venues`.
    pub async fn search_places(
        &self,
        query: &str,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<LocationRecord>, ScraperError> {
        let url = self.topsearch_url(query);
        let JsonBody { url, value } = self.get_json(url, credentials).await?;

        let places = match value.get("places") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(places)) => places,
            Some(_) => {
                return Err(ScraperError::UnexpectedShape {
                    url,
                    reason: "\"places\" is not an array".to_owned(),
                })
            }
        };

        let locations = places
            .iter()
            .filter_map(|entry| entry.get("place")?.get("location").cloned())
            .collect();
        Ok(decode_records(locations))
    }

    async fn get_json(
        &self,
        url: reqwest::Url,
        credentials: Option<&Credentials>,
    ) -> Result<JsonBody, ScraperError> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(credentials) = credentials {
            request = request.header(reqwest::header::COOKIE, credentials.cookie_header());
        }

        let response = request.send().await?;
        let status = response.status();
        let url = body_url(&url);

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited { url });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        let value = serde_json::from_str::<Value>(&text).map_err(|e| ScraperError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })?;

        Ok(JsonBody { url, value })
    }

    /// Coordinates use the shortest form that parses back to the same `f64`,
    /// so grid points closer than any fixed precision stay distinct.
    fn location_search_url(&self, point: QueryPoint) -> reqwest::Url {
        let mut url = self.endpoint("location_search/");
        url.query_pairs_mut()
            .append_pair("latitude", &point.lat.to_string())
            .append_pair("longitude", &point.lng.to_string())
            .append_pair("__a", "1");
        url
    }

    fn topsearch_url(&self, query: &str) -> reqwest::Url {
        let mut url = self.endpoint("web/search/topsearch/");
        url.query_pairs_mut()
            .append_pair("context", "place")
            .append_pair("query", query);
        url
    }

    fn endpoint(&self, path: &str) -> reqwest::Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{base_path}/{path}"));
        url
    }
}

struct JsonBody {
    url: String,
    value: Value,
}

/// URL without its query string, for error messages and logs.
fn body_url(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

fn decode_records(values: Vec<Value>) -> Vec<LocationRecord> {
    values
        .into_iter()
        .filter_map(|value| {
            let kind = json_kind(&value);
            let record = LocationRecord::from_value(value);
            if record.is_none() {
                tracing::debug!(kind, "skipping location entry that is not an object");
            }
            record
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
