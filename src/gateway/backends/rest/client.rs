//! Shared HTTP client for the legacy REST backend.
//!
//! One `reqwest` client configured with the API base URL and a cookie jar.
//! The session rides on cookies; the CSRF token the server sets in the
//! `XSRF-TOKEN` cookie is echoed back in the `X-XSRF-TOKEN` header on every
//! state-changing request. No retry and no response caching, failures
//! surface directly to callers.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::gateway::contract::{GatewayError, GatewayResult};

const CSRF_COOKIE: &str = "XSRF-TOKEN";
const CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Response envelope used by every JSON endpoint of the legacy API.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// A binary download plus the headers callers need to rebuild the file.
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

pub struct RestClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl RestClient {
    pub fn new(base_url: &str) -> GatewayResult<Self> {
        // A trailing slash changes how Url::join resolves relative paths.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            GatewayError::configuration(format!("invalid API base URL {base_url:?}: {e}"))
        })?;

        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| GatewayError::configuration(format!("http client init: {e}")))?;

        Ok(RestClient {
            http,
            jar,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| GatewayError::internal(format!("bad request path {path:?}: {e}")))
    }

    /// Current CSRF token, read back out of the cookie jar.
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let raw = header.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == CSRF_COOKIE).then(|| value.to_string())
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mutating = matches!(
            method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        );
        let mut builder = self.http.request(method, url);
        if mutating {
            if let Some(token) = self.csrf_token() {
                builder = builder.header(CSRF_HEADER, token);
            }
        }
        builder
    }

    /// Send and map non-success statuses onto the error contract.
    async fn execute(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::not_found(if body.is_empty() {
                "resource not found".to_string()
            } else {
                body
            }));
        }
        Err(GatewayError::api(status.as_u16(), body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let response = self.execute(self.request(Method::GET, self.url(path)?)).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let builder = self.request(Method::POST, self.url(path)?).json(body);
        Self::decode(self.execute(builder).await?).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let builder = self.request(Method::PUT, self.url(path)?).json(body);
        Self::decode(self.execute(builder).await?).await
    }

    /// Bodyless PATCH for state transitions such as approve and mark-read.
    pub async fn patch_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let builder = self.request(Method::PATCH, self.url(path)?);
        Self::decode(self.execute(builder).await?).await
    }

    /// POST with no payload and no decoded body (logout and friends).
    pub async fn post_empty(&self, path: &str) -> GatewayResult<()> {
        self.execute(self.request(Method::POST, self.url(path)?))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> GatewayResult<()> {
        self.execute(self.request(Method::DELETE, self.url(path)?))
            .await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> GatewayResult<T> {
        let builder = self.request(Method::POST, self.url(path)?).multipart(form);
        Self::decode(self.execute(builder).await?).await
    }

    pub async fn get_bytes(&self, path: &str) -> GatewayResult<Download> {
        let response = self.execute(self.request(Method::GET, self.url(path)?)).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_disposition_filename);
        let bytes = response.bytes().await?.to_vec();
        Ok(Download {
            bytes,
            content_type,
            filename,
        })
    }
}

/// Pull `filename="x.pdf"` (quoted or bare) out of a Content-Disposition
/// header.
fn parse_disposition_filename(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = value.trim().trim_matches('"').trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = RestClient::new("http://localhost:8080/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            client.url("v1/auth/me").unwrap().as_str(),
            "http://localhost:8080/api/v1/auth/me"
        );
        assert_eq!(
            client.url("/projects/5").unwrap().as_str(),
            "http://localhost:8080/api/projects/5"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(RestClient::new("not a url").is_err());
    }

    #[test]
    fn disposition_filename_parsing() {
        assert_eq!(
            parse_disposition_filename(r#"attachment; filename="resume_en.pdf""#).as_deref(),
            Some("resume_en.pdf")
        );
        assert_eq!(
            parse_disposition_filename("attachment; filename=cv.pdf").as_deref(),
            Some("cv.pdf")
        );
        assert_eq!(parse_disposition_filename("inline"), None);
    }

    #[test]
    fn csrf_token_is_read_from_the_jar() {
        let client = RestClient::new("http://localhost:8080/api").unwrap();
        assert_eq!(client.csrf_token(), None);
        client.jar.add_cookie_str(
            "XSRF-TOKEN=abc123; Path=/",
            client.base_url(),
        );
        assert_eq!(client.csrf_token().as_deref(), Some("abc123"));
    }
}
