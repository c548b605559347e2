use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// REST client for the external appointment datastore (PostgREST-style API).
///
/// The datastore owns appointment records and authorization; callers hand
/// in the request's bearer token untouched. Records are only ever read and
/// patched through here - the service never deletes them.
pub struct DatastoreClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl DatastoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.datastore_url.clone(),
            anon_key: config.datastore_anon_key.clone(),
        }
    }

    fn headers(&self, auth_token: Option<&str>, wants_rows_back: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(key) = HeaderValue::from_str(&self.anon_key) {
            headers.insert("apikey", key);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // PostgREST returns an empty body on writes unless asked otherwise.
        if wants_rows_back {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        if let Some(token) = auth_token {
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, bearer);
            }
        }

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Datastore request: {} {}", method, url);

        let wants_rows_back = method == Method::POST || method == Method::PATCH;
        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(auth_token, wants_rows_back));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Datastore error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("Datastore error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}
