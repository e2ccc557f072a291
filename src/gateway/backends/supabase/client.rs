//! Low-level client for the database-as-a-service APIs: table reads and
//! writes over the REST data interface, password auth against the token
//! endpoint, and object storage for the resume bucket.
//!
//! Every request carries the project `apikey`; data requests also carry a
//! bearer token, the signed-in user's access token when present and the
//! anon key otherwise, which is what row-level security policies key on.

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::gateway::contract::{GatewayError, GatewayResult};
use crate::models::{AuthUser, Session};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            user: AuthUser {
                id: self.user.id,
                email: self.user.email.unwrap_or_default(),
                role: self.user.role,
            },
            access_token: Some(self.access_token),
        }
    }
}

#[derive(Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

pub struct SupabaseClient {
    http: reqwest::Client,
    base: String,
    anon_key: String,
    tokens: RwLock<Tokens>,
}

impl SupabaseClient {
    pub fn new(url: &str, anon_key: &str) -> GatewayResult<Self> {
        if url.trim().is_empty() || anon_key.trim().is_empty() {
            return Err(GatewayError::configuration(
                "direct backend requires a service URL and anon key",
            ));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::configuration(format!("http client init: {e}")))?;
        Ok(SupabaseClient {
            http,
            base: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            tokens: RwLock::new(Tokens::default()),
        })
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.read().access.clone()
    }

    fn bearer(&self) -> String {
        self.tokens
            .read()
            .access
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }

    async fn execute(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::api(status.as_u16(), body))
    }

    // -------------------------------------------------------------------
    // Table operations
    // -------------------------------------------------------------------

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}?{query}", self.base)
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> GatewayResult<Vec<T>> {
        let url = self.table_url(table, &format!("select=*&{query}"));
        let response = self.execute(self.request(Method::GET, url)).await?;
        Ok(response.json().await?)
    }

    pub async fn select_by_id<T: DeserializeOwned>(
        &self,
        table: &str,
        id: i64,
    ) -> GatewayResult<T> {
        let mut rows: Vec<T> = self.select(table, &format!("id=eq.{id}&limit=1")).await?;
        rows.pop().ok_or_else(|| Self::row_missing(table, id))
    }

    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> GatewayResult<T> {
        let url = self.table_url(table, "select=*");
        let builder = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(row);
        let mut rows: Vec<T> = self.execute(builder).await?.json().await?;
        rows.pop()
            .ok_or_else(|| GatewayError::decode(format!("insert into {table} returned no row")))
    }

    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        id: i64,
        patch: &B,
    ) -> GatewayResult<T> {
        let url = self.table_url(table, &format!("id=eq.{id}&select=*"));
        let builder = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(patch);
        let mut rows: Vec<T> = self.execute(builder).await?.json().await?;
        rows.pop().ok_or_else(|| Self::row_missing(table, id))
    }

    /// Delete by id. The representation preference is how we learn whether
    /// anything actually matched.
    pub async fn delete_row(&self, table: &str, id: i64) -> GatewayResult<()> {
        let url = self.table_url(table, &format!("id=eq.{id}"));
        let builder = self
            .request(Method::DELETE, url)
            .header("Prefer", "return=representation");
        let rows: Vec<serde_json::Value> = self.execute(builder).await?.json().await?;
        if rows.is_empty() {
            return Err(Self::row_missing(table, id));
        }
        Ok(())
    }

    pub async fn rpc<B: Serialize, T: DeserializeOwned>(
        &self,
        function: &str,
        args: &B,
    ) -> GatewayResult<T> {
        let url = format!("{}/rest/v1/rpc/{function}", self.base);
        let response = self
            .execute(self.request(Method::POST, url).json(args))
            .await?;
        Ok(response.json().await?)
    }

    fn row_missing(table: &str, id: i64) -> GatewayError {
        GatewayError::not_found(format!("no row {id} in {table}")).with_entity(table)
    }

    // -------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------

    pub async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base);
        let builder = self
            .request(Method::POST, url)
            .json(&serde_json::json!({ "email": email, "password": password }));
        let token: TokenResponse = self.execute(builder).await?.json().await?;
        {
            let mut tokens = self.tokens.write();
            tokens.access = Some(token.access_token.clone());
            tokens.refresh = token.refresh_token.clone();
        }
        Ok(token.into_session())
    }

    /// Exchange the stored refresh token for a new session.
    pub async fn refresh(&self) -> GatewayResult<Session> {
        let refresh = self.tokens.read().refresh.clone().ok_or_else(|| {
            GatewayError::api(401, "no refresh token").with_operation("refresh")
        })?;
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", self.base);
        let builder = self
            .request(Method::POST, url)
            .json(&serde_json::json!({ "refresh_token": refresh }));
        let token: TokenResponse = self.execute(builder).await?.json().await?;
        {
            let mut tokens = self.tokens.write();
            tokens.access = Some(token.access_token.clone());
            tokens.refresh = token.refresh_token.clone();
        }
        Ok(token.into_session())
    }

    /// Revoke the session server-side and always drop the local tokens.
    pub async fn sign_out(&self) -> GatewayResult<()> {
        let had_token = self.tokens.read().access.is_some();
        let result = if had_token {
            let url = format!("{}/auth/v1/logout", self.base);
            self.execute(self.request(Method::POST, url)).await.map(|_| ())
        } else {
            Ok(())
        };
        *self.tokens.write() = Tokens::default();
        result
    }

    // -------------------------------------------------------------------
    // Object storage
    // -------------------------------------------------------------------

    pub async fn storage_upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> GatewayResult<()> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base);
        let builder = self
            .request(Method::POST, url)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        self.execute(builder).await?;
        Ok(())
    }

    /// Fetch an object from the public bucket URL. A miss is `Ok(None)` so
    /// callers can probe a candidate list.
    pub async fn storage_fetch_public(
        &self,
        bucket: &str,
        path: &str,
    ) -> GatewayResult<Option<Vec<u8>>> {
        let url = format!("{}/storage/v1/object/public/{bucket}/{path}", self.base);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(Some(response.bytes().await?.to_vec()));
        }
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::api(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_credentials() {
        assert!(SupabaseClient::new("", "key").is_err());
        assert!(SupabaseClient::new("https://x.supabase.co", " ").is_err());
        assert!(SupabaseClient::new("https://x.supabase.co", "anon").is_ok());
    }

    #[test]
    fn bearer_falls_back_to_anon_key() {
        let client = SupabaseClient::new("https://x.supabase.co", "anon").unwrap();
        assert_eq!(client.bearer(), "anon");
        client.tokens.write().access = Some("jwt".to_string());
        assert_eq!(client.bearer(), "jwt");
    }

    #[test]
    fn table_urls_are_rooted_at_the_data_interface() {
        let client = SupabaseClient::new("https://x.supabase.co/", "anon").unwrap();
        assert_eq!(
            client.table_url("projects", "select=*&order=created_at.desc"),
            "https://x.supabase.co/rest/v1/projects?select=*&order=created_at.desc"
        );
    }
}
