mod category;
mod model;
mod parse;

pub use category::Category;
pub use model::{merge_ranked, TorrentSummary, MAX_RESULTS};
pub use parse::ROWS_PER_CATEGORY;

use crate::magnet::MagnetDescriptor;
use crate::{bencode, Error, Result};
use bytes::Bytes;
use futures::future::join_all;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{header, redirect, StatusCode};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://ncore.pro";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// The site rejects non-browser user agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Download passkey, required by the site for torrent-file downloads.
    pub passkey: Option<String>,
}

/// Cookie store that can be emptied in place. reqwest's own `Jar` has no
/// clear operation, so the jar sits behind a lock and reset swaps in a fresh
/// one — logout can then always drop the cookies, without rebuilding the
/// transport.
#[derive(Default)]
struct SessionJar {
    inner: RwLock<Jar>,
}

impl SessionJar {
    fn reset(&self) {
        *self.inner.write().expect("jar lock poisoned") = Jar::default();
    }
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, headers: &mut dyn Iterator<Item = &header::HeaderValue>, url: &Url) {
        self.inner
            .read()
            .expect("jar lock poisoned")
            .set_cookies(headers, url)
    }

    fn cookies(&self, url: &Url) -> Option<header::HeaderValue> {
        self.inner.read().expect("jar lock poisoned").cookies(url)
    }
}

/// One logical session against the torrent index: a cookie-bearing
/// transport plus the login state machine. Login and logout serialize on the
/// inner mutex; already-authenticated queries share a clone of the transport
/// and run concurrently.
pub struct NcoreClient {
    base_url: String,
    credentials: Credentials,
    http: reqwest::Client,
    jar: Arc<SessionJar>,
    logged_in: Mutex<bool>,
}

impl NcoreClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let jar = Arc::new(SessionJar::default());
        let http = build_http(Arc::clone(&jar))?;
        Ok(Self {
            base_url,
            credentials,
            http,
            jar,
            logged_in: Mutex::new(false),
        })
    }

    pub async fn is_logged_in(&self) -> bool {
        *self.logged_in.lock().await
    }

    /// Submits the login form and verifies the site accepted it. Redirects
    /// are disabled on the transport, so a 302 off the login page is itself
    /// the success signal; otherwise the returned page must carry the
    /// logged-in-only logout link.
    pub async fn login(&self) -> Result<()> {
        let mut logged_in = self.logged_in.lock().await;
        self.login_locked(&mut logged_in).await
    }

    async fn login_locked(&self, logged_in: &mut bool) -> Result<()> {
        let login_url = format!("{}/login.php", self.base_url);

        // prime the cookie jar before posting credentials
        self.http.get(&login_url).send().await?;

        let form = [
            ("nev", self.credentials.username.as_str()),
            ("pass", self.credentials.password.as_str()),
            ("submitted", "1"),
        ];
        let rsp = self
            .http
            .post(&login_url)
            .header(header::REFERER, &login_url)
            .form(&form)
            .send()
            .await?;

        let status = rsp.status();
        if status.is_redirection() {
            debug!(%status, "login accepted via redirect");
            *logged_in = true;
            return Ok(());
        }

        let body = rsp.text().await?;
        if body.contains("logout.php") {
            debug!("login accepted, logout link present");
            *logged_in = true;
            return Ok(());
        }

        Err(Error::AuthenticationFailed {
            status: status.as_u16(),
            excerpt: excerpt(&body),
        })
    }

    /// Logs in unless this session already is; returns a transport clone the
    /// caller can issue authenticated requests on. Authentication strictly
    /// happens-before any request made on the returned clone.
    async fn ensure_login(&self) -> Result<reqwest::Client> {
        let mut logged_in = self.logged_in.lock().await;
        if !*logged_in {
            self.login_locked(&mut logged_in).await?;
        }
        Ok(self.http.clone())
    }

    /// Best-effort logout. Transport errors are swallowed; the session is
    /// always left unauthenticated with an empty cookie jar.
    pub async fn logout(&self) {
        let mut logged_in = self.logged_in.lock().await;
        let logout_url = format!("{}/logout.php", self.base_url);
        if let Err(err) = self.http.get(&logout_url).send().await {
            debug!(err = ?err, "logout request failed, ignoring");
        }
        self.jar.reset();
        *logged_in = false;
    }

    /// Queries all six categories for `term` and returns the merged ranking:
    /// seeders descending, ties in category priority order, at most
    /// [`MAX_RESULTS`] entries. Individual category failures are absorbed;
    /// only a failed login is an error.
    pub async fn search(&self, term: &str) -> Result<Vec<TorrentSummary>> {
        let http = self.ensure_login().await?;

        let queries = Category::ALL.map(|category| {
            let http = http.clone();
            async move {
                let outcome = self.search_category(&http, category, term).await;
                (category, outcome)
            }
        });
        let outcomes = join_all(queries).await;

        Ok(merge_ranked(outcomes))
    }

    async fn search_category(
        &self,
        http: &reqwest::Client,
        category: Category,
        term: &str,
    ) -> Result<Vec<TorrentSummary>> {
        let url = format!("{}/torrents.php", self.base_url);
        let rsp = http
            .get(&url)
            .query(&[
                ("mire", term),
                ("miben", category.code()),
                ("tipus", "kivalasztottak_kozott"),
                ("submit.x", "0"),
                ("submit.y", "0"),
                ("submit", "Ok"),
                ("tags", ""),
            ])
            .send()
            .await?;

        let status = rsp.status();
        if status != StatusCode::OK {
            return Err(Error::Generic(format!("search returned status {status}")));
        }

        let html = rsp.text().await?;
        let rows = parse::parse_rows(&html, category, &self.base_url);
        debug!(%category, rows = rows.len(), "category page parsed");
        Ok(rows)
    }

    /// Downloads the torrent file for `id` and derives its magnet link.
    pub async fn fetch_magnet(&self, id: &str) -> Result<MagnetDescriptor> {
        let http = self.ensure_login().await?;

        let url = format!("{}/torrents.php", self.base_url);
        let mut query = vec![("action", "download"), ("id", id)];
        if let Some(key) = self.credentials.passkey.as_deref() {
            query.push(("key", key));
        }

        let rsp = http.get(&url).query(&query).send().await?;
        let status = rsp.status();
        if status.is_redirection() {
            // bounced back to the login page: the session expired mid-flight
            return Err(Error::DownloadBlocked);
        }
        if status != StatusCode::OK {
            return Err(Error::Generic(format!("download returned status {status}")));
        }

        let payload: Bytes = rsp.bytes().await?;
        magnet_from_payload(&payload)
    }
}

/// Converts a downloaded torrent payload into a magnet descriptor. An HTML
/// payload (anti-automation challenge or an expired session serving an error
/// page) is rejected before any decoding is attempted.
pub fn magnet_from_payload(payload: &[u8]) -> Result<MagnetDescriptor> {
    if payload_looks_like_html(payload) {
        return Err(Error::DownloadBlocked);
    }
    let torrent = bencode::from_bytes(payload)?;
    MagnetDescriptor::from_torrent(&torrent)
}

fn payload_looks_like_html(payload: &[u8]) -> bool {
    payload.first() == Some(&b'<')
}

fn build_http(jar: Arc<SessionJar>) -> Result<reqwest::Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("hu-HU,hu;q=0.9,en-US;q=0.8,en;q=0.7"),
    );

    let http = reqwest::Client::builder()
        .cookie_provider(jar)
        .timeout(REQUEST_TIMEOUT)
        .redirect(redirect::Policy::none())
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(http)
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    let mut end = trimmed.len().min(200);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
