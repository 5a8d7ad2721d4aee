//! HTTP client for the platform API.

use std::collections::BTreeMap;

use tracing::debug;

use crate::interfaces::platform::{ConfigUpdates, PlatformConfig};
use crate::interfaces::queries::{QueryReply, QueryRequest};
use crate::interfaces::users::{
    ChangePassword, Login, Password, Researcher, ResearcherRecord, TokenGrant,
};
use crate::session::{self, MemoryTokenStore, TokenStore};
use crate::{Error, QueryKind, Result, utils};

/// The base URL used when `SEPTON_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8088";

/// The environment variable overriding the API base URL.
const BASE_URL_ENV: &str = "SEPTON_API_URL";

/// An asynchronous client for the platform API.
///
/// One client serves one session: a login stores the issued token in the
/// client's [`TokenStore`] and subsequent authenticated calls attach it as a
/// bearer credential. An expired or missing token fails the call with
/// [`Error::Unauthorized`] before any request is sent.
#[derive(Debug)]
pub struct Client<S: TokenStore = MemoryTokenStore> {
    http: reqwest::Client,
    base_url: String,
    store: S,
}

impl Client {
    /// Create a client for the given base URL with a fresh in-memory token
    /// store.
    ///
    /// # Errors
    ///
    /// Fails when the base URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_store(base_url, MemoryTokenStore::new())
    }

    /// Create a client from the `SEPTON_API_URL` environment variable,
    /// falling back to `http://localhost:8088`.
    ///
    /// # Errors
    ///
    /// Fails when the configured base URL cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(&base_url)
    }
}

impl<S: TokenStore> Client<S> {
    /// Create a client with a caller-provided token store, for sessions that
    /// outlive the process or are shared with other clients.
    ///
    /// # Errors
    ///
    /// Fails when the base URL cannot be parsed.
    pub fn with_store(base_url: &str, store: S) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: utils::clean_base_url(base_url)?,
            store,
        })
    }

    /// The token store backing this client's session.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Exchange credentials for a bearer token and remember it for
    /// subsequent calls.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Api`] when the credentials are rejected, or
    /// [`Error::Http`] when the request cannot be delivered.
    pub async fn login(&self, username: &str, password: Password) -> Result<TokenGrant> {
        let url = format!("{}/api/users/login", self.base_url);
        debug!("logging in {username}");

        let body = Login { username: username.to_string(), password };
        let reply = self.http.post(&url).json(&body).send().await?;
        let grant: TokenGrant = success(reply).await?.json().await?;

        self.store.put(grant.clone());
        Ok(grant)
    }

    /// Forget the session token.
    pub fn logout(&self) {
        self.store.clear();
    }

    /// Change an account's password. The platform accepts this without a
    /// session; the account re-authenticates afterwards.
    ///
    /// # Errors
    ///
    /// Fails with a validation error before sending when the request is
    /// incomplete or the new password is too weak, and with [`Error::Api`]
    /// when the platform rejects it.
    pub async fn change_password(&self, request: &ChangePassword) -> Result<()> {
        request.validate()?;

        let url = format!("{}/api/users/change_password", self.base_url);
        debug!("changing password for {}", request.username);

        let reply = self.http.put(&url).json(request).send().await?;
        success(reply).await?;
        Ok(())
    }

    /// Register a researcher account. Requires an admin session.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unauthorized`] without a usable session token.
    pub async fn register_researcher(&self, researcher: &Researcher) -> Result<()> {
        let url = format!("{}/api/users/register", self.base_url);
        debug!("registering researcher {}", researcher.email);

        let reply =
            self.http.post(&url).bearer_auth(self.bearer()?).json(researcher).send().await?;
        success(reply).await?;
        Ok(())
    }

    /// List the registered researcher accounts. Requires an admin session.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unauthorized`] without a usable session token.
    pub async fn researchers(&self) -> Result<Vec<ResearcherRecord>> {
        let url = format!("{}/api/users/researchers", self.base_url);

        let reply = self.http.get(&url).bearer_auth(self.bearer()?).send().await?;
        Ok(success(reply).await?.json().await?)
    }

    /// Delete a researcher account. Requires an admin session.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unauthorized`] without a usable session token.
    pub async fn remove_researcher(&self, user_id: &str) -> Result<()> {
        let url = format!("{}/api/users/delete", self.base_url);
        debug!("removing researcher {user_id}");

        let reply = self
            .http
            .delete(&url)
            .query(&[("user_id", user_id)])
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        success(reply).await?;
        Ok(())
    }

    /// Fetch the platform configuration: settable property names and current
    /// values. Requires an admin session.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unauthorized`] without a usable session token.
    pub async fn configs(&self) -> Result<PlatformConfig> {
        let url = format!("{}/api/platform/configs", self.base_url);

        let reply = self.http.get(&url).bearer_auth(self.bearer()?).send().await?;
        Ok(success(reply).await?.json().await?)
    }

    /// Apply a batch of platform configuration updates. Requires an admin
    /// session.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unauthorized`] without a usable session token.
    pub async fn update_configs(&self, updates: &ConfigUpdates) -> Result<()> {
        let url = format!("{}/api/platform/configs", self.base_url);
        debug!("updating {} platform configs", updates.len());

        let reply = self.http.post(&url).bearer_auth(self.bearer()?).json(updates).send().await?;
        success(reply).await?;
        Ok(())
    }

    /// Submit a query and parse the reply for its kind. Requires a session.
    ///
    /// The request is sent once; there is no retry and no cancellation once
    /// it is on the wire. Errors are scoped to this submission.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Unauthorized`] without a usable session token,
    /// [`Error::Api`] on a non-success reply, or [`Error::Http`] when the
    /// request cannot be delivered.
    pub async fn execute(&self, request: &QueryRequest) -> Result<QueryReply> {
        let url = format!("{}{}", self.base_url, request.endpoint());
        debug!("submitting {} query with {} filters", request.query_kind, request.filters.len());

        let reply =
            self.http.post(&url).bearer_auth(self.bearer()?).json(request).send().await?;
        let reply = success(reply).await?;

        match request.query_kind {
            QueryKind::Count => Ok(QueryReply::Count(reply.json().await?)),
            QueryKind::Average => Ok(QueryReply::Average(reply.json().await?)),
            QueryKind::GroupedCount => Ok(QueryReply::GroupedCount(reply.json().await?)),
        }
    }

    /// The session's bearer token, if present and not expired. An expired
    /// token is cleared from the store, as a logout would.
    fn bearer(&self) -> Result<String> {
        let Some(grant) = self.store.grant() else {
            return Err(Error::Unauthorized("no session token, log in first".to_string()));
        };
        if session::is_expired(&grant.jwt) {
            self.store.clear();
            return Err(Error::Unauthorized("session token has expired".to_string()));
        }
        Ok(grant.jwt)
    }
}

/// Map a non-success reply to an [`Error::Api`] carrying the body.
async fn success(reply: reqwest::Response) -> Result<reqwest::Response> {
    let status = reply.status();
    if status.is_success() {
        return Ok(reply);
    }
    let detail = reply.text().await.unwrap_or_default();
    Err(Error::Api { status: status.as_u16(), detail })
}
