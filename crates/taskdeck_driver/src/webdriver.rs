//! Blocking WebDriver session over HTTP.
//!
//! # Responsibility
//! - Own one remote browser session for the lifetime of a script run.
//! - Implement the core [`Browser`] trait against a chromedriver-style
//!   endpoint.
//!
//! # Invariants
//! - The session is released exactly once, on `quit` or on drop,
//!   regardless of success or failure path.
//! - Elements are re-located per action; no stale references are kept
//!   across page loads.

use crate::wire;
use log::{info, warn};
use reqwest::blocking::Client;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use taskdeck_core::{Browser, BrowserError, BrowserResult};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub type WebDriverResult<T> = Result<T, WebDriverError>;

/// Failures talking to the webdriver endpoint.
#[derive(Debug)]
pub enum WebDriverError {
    /// Connection or HTTP-level failure.
    Transport(reqwest::Error),
    /// The remote answered with a W3C error payload.
    Protocol {
        status: u16,
        error: String,
        message: String,
    },
    /// `no such element` for the given selector.
    NoSuchElement { selector: String },
    /// The remote answered 2xx with a body we cannot use.
    InvalidResponse(String),
}

impl Display for WebDriverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "webdriver transport failure: {err}"),
            Self::Protocol {
                status,
                error,
                message,
            } => write!(f, "webdriver error `{error}` (http {status}): {message}"),
            Self::NoSuchElement { selector } => write!(f, "no such element: `{selector}`"),
            Self::InvalidResponse(reason) => write!(f, "invalid webdriver response: {reason}"),
        }
    }
}

impl Error for WebDriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WebDriverError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Connection settings for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the webdriver endpoint.
    pub webdriver_url: String,
    /// Run the browser headless with the CI hardening flags.
    pub headless: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
        }
    }
}

/// One exclusive browser session.
pub struct Session {
    http: Client,
    base: String,
    session_id: Option<String>,
}

impl Session {
    /// Creates a remote session.
    ///
    /// # Errors
    /// - Transport errors when the endpoint is unreachable.
    /// - Protocol errors when session creation is refused.
    pub fn start(config: &SessionConfig) -> WebDriverResult<Self> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        let base = config.webdriver_url.trim_end_matches('/').to_string();

        let body = post_raw(
            &http,
            &format!("{base}/session"),
            &wire::new_session_payload(config.headless),
            None,
        )?;
        let session_id = wire::parse_session_id(&body)?;
        info!("event=session_start module=webdriver status=ok session={session_id}");

        Ok(Self {
            http,
            base,
            session_id: Some(session_id),
        })
    }

    /// Releases the session explicitly. Safe to call once; `Drop` covers
    /// every other path.
    pub fn quit(&mut self) {
        let Some(session_id) = self.session_id.take() else {
            return;
        };
        let url = format!("{}/session/{session_id}", self.base);
        match self.http.delete(&url).send() {
            Ok(response) if release_succeeded(response.status()) => {
                info!("event=session_quit module=webdriver status=ok session={session_id}");
            }
            Ok(response) => {
                warn!(
                    "event=session_quit module=webdriver status=error session={session_id} http={}",
                    response.status().as_u16()
                );
            }
            Err(err) => {
                warn!("event=session_quit module=webdriver status=error reason={err}");
            }
        }
    }

    fn session_url(&self, suffix: &str) -> WebDriverResult<String> {
        let session_id = self
            .session_id
            .as_deref()
            .ok_or_else(|| WebDriverError::InvalidResponse("session already released".to_string()))?;
        Ok(format!("{}/session/{session_id}{suffix}", self.base))
    }

    fn post(&self, suffix: &str, payload: &Value, selector: Option<&str>) -> WebDriverResult<Value> {
        post_raw(&self.http, &self.session_url(suffix)?, payload, selector)
    }

    fn get(&self, suffix: &str) -> WebDriverResult<Value> {
        let response = self.http.get(self.session_url(suffix)?).send()?;
        decode(response, None)
    }

    /// Locates one element by CSS selector, returning its W3C reference.
    pub fn find_element(&self, selector: &str) -> WebDriverResult<String> {
        let body = self.post(
            "/element",
            &wire::find_element_payload(selector),
            Some(selector),
        )?;
        wire::parse_element_id(&body)
    }

    fn element_post(&self, selector: &str, action: &str, payload: &Value) -> WebDriverResult<()> {
        let element = self.find_element(selector)?;
        self.post(&format!("/element/{element}/{action}"), payload, Some(selector))?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.quit();
    }
}

impl Browser for Session {
    fn navigate(&mut self, url: &str) -> BrowserResult<()> {
        self.post("/url", &wire::navigate_payload(url), None)
            .map(|_| ())
            .map_err(to_browser_error)
    }

    fn title(&mut self) -> BrowserResult<String> {
        self.get("/title")
            .and_then(|body| wire::parse_string_value(&body))
            .map_err(to_browser_error)
    }

    fn find(&mut self, selector: &str) -> BrowserResult<()> {
        self.find_element(selector)
            .map(|_| ())
            .map_err(to_browser_error)
    }

    fn type_text(&mut self, selector: &str, text: &str) -> BrowserResult<()> {
        self.element_post(selector, "value", &wire::send_keys_payload(text))
            .map_err(to_browser_error)
    }

    fn clear(&mut self, selector: &str) -> BrowserResult<()> {
        self.element_post(selector, "clear", &Value::Object(Default::default()))
            .map_err(to_browser_error)
    }

    fn click(&mut self, selector: &str) -> BrowserResult<()> {
        self.element_post(selector, "click", &Value::Object(Default::default()))
            .map_err(to_browser_error)
    }

    fn text_of(&mut self, selector: &str) -> BrowserResult<String> {
        let element = self.find_element(selector).map_err(to_browser_error)?;
        self.get(&format!("/element/{element}/text"))
            .and_then(|body| wire::parse_string_value(&body))
            .map_err(to_browser_error)
    }
}

fn post_raw(
    http: &Client,
    url: &str,
    payload: &Value,
    selector: Option<&str>,
) -> WebDriverResult<Value> {
    let response = http.post(url).json(payload).send()?;
    decode(response, selector)
}

fn decode(
    response: reqwest::blocking::Response,
    selector: Option<&str>,
) -> WebDriverResult<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .map_err(|err| WebDriverError::InvalidResponse(format!("non-JSON body: {err}")))?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(wire::parse_error(status.as_u16(), &body, selector))
    }
}

/// A session release only counts as clean on a 2xx answer; the remote
/// reports failed teardown through the same error-payload shape as any
/// other command.
fn release_succeeded(status: reqwest::StatusCode) -> bool {
    status.is_success()
}

fn to_browser_error(error: WebDriverError) -> BrowserError {
    match error {
        WebDriverError::NoSuchElement { selector } => BrowserError::NotFound { selector },
        other => BrowserError::Driver(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{release_succeeded, to_browser_error, SessionConfig, WebDriverError};
    use reqwest::StatusCode;
    use taskdeck_core::BrowserError;

    #[test]
    fn session_release_is_clean_only_on_success_statuses() {
        assert!(release_succeeded(StatusCode::OK));
        assert!(release_succeeded(StatusCode::NO_CONTENT));
        assert!(!release_succeeded(StatusCode::NOT_FOUND));
        assert!(!release_succeeded(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn default_config_targets_local_chromedriver() {
        let config = SessionConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert!(config.headless);
    }

    #[test]
    fn no_such_element_becomes_browser_not_found() {
        let error = to_browser_error(WebDriverError::NoSuchElement {
            selector: "#app".to_string(),
        });
        match error {
            BrowserError::NotFound { selector } => assert_eq!(selector, "#app"),
            other => panic!("expected NotFound, got {other}"),
        }
    }

    #[test]
    fn protocol_errors_keep_detail_in_driver_message() {
        let error = to_browser_error(WebDriverError::Protocol {
            status: 500,
            error: "session not created".to_string(),
            message: "chrome failed to start".to_string(),
        });
        match error {
            BrowserError::Driver(message) => {
                assert!(message.contains("session not created"));
                assert!(message.contains("chrome failed to start"));
            }
            other => panic!("expected Driver, got {other}"),
        }
    }
}
