use crate::error::NetworkError;
use crate::types::endpoint::Endpoint;
use crate::types::window::DateWindow;
use log::{debug, info, warn};
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://meteo.arso.gov.si/webmet/archive";
pub const DEFAULT_LANG: &str = "si";

/// Builds archive URLs and downloads response bodies as text.
///
/// The underlying client has no request timeout: archive responses for long windows can take
/// minutes to arrive.
#[derive(Debug, Clone)]
pub struct ArchiveLoader {
    client: Client,
    base_url: String,
    lang: String,
}

impl ArchiveLoader {
    pub fn new(client: Client, base_url: &str, lang: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            lang: lang.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn locations_url(&self, station_type: i32, window: &DateWindow) -> String {
        format!(
            "{}/locations.xml?d1={}&d2={}&type={}&lang={}",
            self.base_url,
            window.d1(),
            window.d2(),
            station_type,
            self.lang
        )
    }

    pub fn data_url(&self, endpoint: Endpoint, station_id: &str, window: &DateWindow) -> String {
        format!(
            "{}/data.xml?lang={}&vars={}&group={}&type={}&id={}&d1={}&d2={}",
            self.base_url,
            self.lang,
            endpoint.vars(),
            endpoint.group(),
            endpoint.aggregation(),
            station_id,
            window.d1(),
            window.d2()
        )
    }

    /// GETs `url` and decodes the body as UTF-8, replacing invalid sequences.
    pub async fn download_text(&self, url: &str) -> Result<String, NetworkError> {
        info!("Downloading {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::Request(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    NetworkError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    NetworkError::Request(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Body(url.to_string(), e))?;
        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
