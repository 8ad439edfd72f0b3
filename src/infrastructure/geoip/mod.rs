//! IP Geolocation Client
//!
//! Resolves login/registration IPs to coarse locations through an
//! ip-api.com style JSON endpoint, behind a trait for testability.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GeoIpSettings;
use crate::domain::UserLocation;
use crate::shared::error::AppError;

/// Locator abstraction over the geolocation API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Resolve an IP address to a location.
    async fn locate(&self, ip: &str) -> Result<UserLocation, AppError>;
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: String,
    #[serde(default)]
    continent: String,
    #[serde(default)]
    country: String,
    #[serde(rename = "countryCode", default)]
    country_code: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    query: String,
}

/// HTTP implementation of the geolocation lookup.
pub struct HttpGeoLocator {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGeoLocator {
    pub fn new(settings: &GeoIpSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GeoLocator for HttpGeoLocator {
    async fn locate(&self, ip: &str) -> Result<UserLocation, AppError> {
        let url = format!("{}/json/{}", self.base_url, ip);

        let response = self
            .http
            .get(&url)
            .query(&[("fields", "status,continent,country,countryCode,city,query")])
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Geolocation request failed: {}", e)))?;

        let geo: GeoResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid geolocation payload: {}", e)))?;

        if geo.status != "success" {
            return Err(AppError::Internal(format!(
                "Geolocation lookup failed for {}",
                ip
            )));
        }

        Ok(UserLocation {
            continent: geo.continent,
            country: geo.country,
            country_flag_url: format!("https://flagsapi.com/{}/flat/16.png", geo.country_code),
            city: geo.city,
            ip: geo.query,
        })
    }
}
