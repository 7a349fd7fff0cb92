//! W3C WebDriver payload builders and response parsers.
//!
//! # Responsibility
//! - Build request bodies and decode `value`-wrapped responses without
//!   touching the network, so the codec is testable in isolation.
//!
//! # Invariants
//! - Every parser rejects a missing or mis-typed `value` instead of
//!   defaulting.

use crate::webdriver::WebDriverError;
use serde_json::{json, Value};

/// Key the W3C protocol uses for element references.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Chrome arguments matching the original CI setup.
const HEADLESS_ARGS: &[&str] = &["--headless", "--no-sandbox", "--disable-dev-shm-usage"];

/// New-session capabilities payload.
pub fn new_session_payload(headless: bool) -> Value {
    let args: Vec<&str> = if headless {
        HEADLESS_ARGS.to_vec()
    } else {
        Vec::new()
    };
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": { "args": args }
            }
        }
    })
}

/// Body for `POST /session/{id}/url`.
pub fn navigate_payload(url: &str) -> Value {
    json!({ "url": url })
}

/// Body for `POST /session/{id}/element` using a CSS selector.
pub fn find_element_payload(selector: &str) -> Value {
    json!({ "using": "css selector", "value": selector })
}

/// Body for `POST /session/{id}/element/{el}/value`.
pub fn send_keys_payload(text: &str) -> Value {
    json!({ "text": text })
}

/// Extracts the session id from a new-session response.
pub fn parse_session_id(body: &Value) -> Result<String, WebDriverError> {
    body["value"]["sessionId"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(body, "missing value.sessionId"))
}

/// Extracts the element reference from a find-element response.
pub fn parse_element_id(body: &Value) -> Result<String, WebDriverError> {
    body["value"][ELEMENT_KEY]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(body, "missing element reference"))
}

/// Extracts a plain string `value` (title, element text).
pub fn parse_string_value(body: &Value) -> Result<String, WebDriverError> {
    body["value"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(body, "missing string value"))
}

/// Maps a non-success response to a semantic error.
///
/// # Contract
/// - `no such element` becomes `WebDriverError::NoSuchElement` carrying
///   the selector; everything else stays a protocol error with the
///   remote error code and message intact.
pub fn parse_error(status: u16, body: &Value, selector: Option<&str>) -> WebDriverError {
    let error = body["value"]["error"].as_str().unwrap_or("unknown");
    let message = body["value"]["message"].as_str().unwrap_or("").to_string();
    if error == "no such element" {
        return WebDriverError::NoSuchElement {
            selector: selector.unwrap_or("<unknown>").to_string(),
        };
    }
    WebDriverError::Protocol {
        status,
        error: error.to_string(),
        message,
    }
}

fn invalid(body: &Value, reason: &str) -> WebDriverError {
    WebDriverError::InvalidResponse(format!("{reason} in `{body}`"))
}

#[cfg(test)]
mod tests {
    use super::{
        find_element_payload, new_session_payload, parse_element_id, parse_error,
        parse_session_id, parse_string_value, ELEMENT_KEY,
    };
    use crate::webdriver::WebDriverError;
    use serde_json::json;

    #[test]
    fn headless_session_payload_carries_ci_flags() {
        let payload = new_session_payload(true);
        let args = &payload["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"];
        assert_eq!(
            args,
            &json!(["--headless", "--no-sandbox", "--disable-dev-shm-usage"])
        );
    }

    #[test]
    fn headful_session_payload_has_no_flags() {
        let payload = new_session_payload(false);
        let args = &payload["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"];
        assert_eq!(args, &json!([]));
    }

    #[test]
    fn find_element_uses_css_selector_strategy() {
        let payload = find_element_payload("#app");
        assert_eq!(payload["using"], "css selector");
        assert_eq!(payload["value"], "#app");
    }

    #[test]
    fn session_id_parses_from_value_wrapper() {
        let body = json!({ "value": { "sessionId": "abc123", "capabilities": {} } });
        assert_eq!(parse_session_id(&body).expect("session id"), "abc123");
    }

    #[test]
    fn missing_session_id_is_invalid_response() {
        let body = json!({ "value": {} });
        let error = parse_session_id(&body).expect_err("no session id");
        assert!(matches!(error, WebDriverError::InvalidResponse(_)));
    }

    #[test]
    fn element_id_parses_from_w3c_key() {
        let body = json!({ "value": { "element-6066-11e4-a52e-4f735466cecf": "el-7" } });
        assert_eq!(parse_element_id(&body).expect("element id"), "el-7");
    }

    #[test]
    fn string_value_parses_title_responses() {
        let body = json!({ "value": "Task Manager - Selenium Demo" });
        assert_eq!(
            parse_string_value(&body).expect("title"),
            "Task Manager - Selenium Demo"
        );
    }

    #[test]
    fn no_such_element_maps_to_semantic_error() {
        let body = json!({ "value": { "error": "no such element", "message": "nope" } });
        let error = parse_error(404, &body, Some("#missing"));
        match error {
            WebDriverError::NoSuchElement { selector } => assert_eq!(selector, "#missing"),
            other => panic!("expected NoSuchElement, got {other}"),
        }
    }

    #[test]
    fn other_errors_keep_remote_code_and_message() {
        let body = json!({ "value": { "error": "invalid session id", "message": "gone" } });
        let error = parse_error(404, &body, None);
        match error {
            WebDriverError::Protocol {
                status,
                error,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(error, "invalid session id");
                assert_eq!(message, "gone");
            }
            other => panic!("expected Protocol, got {other}"),
        }
    }
}
