//! Form submission bridge.
//!
//! Intercepts a form's `submit` event, serializes its fields into a JSON
//! object and posts it to the form's own action URL, reporting the outcome
//! through a blocking alert. One best-effort attempt per submission: no
//! retries, timeouts or in-flight tracking, and every failure (transport,
//! non-2xx status, undecodable body) is surfaced through the same message.

use gloo_net::http::Request;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement, SubmitEvent};

/// Attach the bridge to the form with the given element id.
///
/// Call once after the form is in the DOM. If no such element exists the
/// call is a silent no-op.
pub fn init_submit_bridge(form_id: &str) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };
    let form = match document
        .get_element_by_id(form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    {
        Some(f) => f,
        None => return,
    };

    let handler_form = form.clone();
    let closure = Closure::<dyn FnMut(SubmitEvent)>::new(move |event: SubmitEvent| {
        // Native navigation is suppressed unconditionally, even when the
        // request below never gets off the ground.
        event.prevent_default();

        let action = handler_form.action();
        let payload = match read_form_fields(&handler_form) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Error: {}", e);
                alert(&error_message(&e));
                return;
            }
        };

        wasm_bindgen_futures::spawn_local(async move {
            match submit(&action, payload).await {
                Ok(value) => {
                    log::info!("{}", value);
                    alert(&success_message(&value));
                }
                Err(e) => {
                    log::error!("Error: {}", e);
                    alert(&error_message(&e));
                }
            }
        });
    });

    if form
        .add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
        .is_ok()
    {
        // The listener lives as long as the page does
        closure.forget();
    }
}

/// Read the form's current fields into name/value pairs.
fn read_form_fields(form: &HtmlFormElement) -> Result<Map<String, Value>, String> {
    let data = FormData::new_with_form(form)
        .map_err(|_| "Failed to read form fields".to_string())?;
    let entries = js_sys::try_iter(&data.entries())
        .ok()
        .flatten()
        .ok_or_else(|| "Failed to read form fields".to_string())?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|_| "Failed to read form fields".to_string())?;
        let pair: js_sys::Array = entry
            .dyn_into()
            .map_err(|_| "Failed to read form fields".to_string())?;
        // File fields have no string form and are skipped
        if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            pairs.push((key, value));
        }
    }
    Ok(merge_fields(pairs))
}

async fn submit(action: &str, payload: Map<String, Value>) -> Result<Value, String> {
    let response = Request::post(action)
        .json(&Value::Object(payload))
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed: {}", response.status()));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Fold name/value pairs into a JSON object. A repeated name keeps its last
/// value; every value stays a string.
fn merge_fields(pairs: impl IntoIterator<Item = (String, String)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in pairs {
        map.insert(name, Value::String(value));
    }
    map
}

fn success_message(payload: &Value) -> String {
    format!("Evaluation Result: {}", payload)
}

fn error_message(description: &str) -> String {
    format!("An error occurred during evaluation: {}", description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_payload_contains_exactly_submitted_pairs() {
        let payload = merge_fields(pairs(&[("name", "alice"), ("age", "30")]));
        assert_eq!(
            Value::Object(payload),
            serde_json::json!({ "name": "alice", "age": "30" })
        );
    }

    #[test]
    fn test_duplicate_names_keep_last_value() {
        let payload = merge_fields(pairs(&[
            ("choice", "first"),
            ("other", "x"),
            ("choice", "last"),
        ]));
        assert_eq!(payload.get("choice"), Some(&Value::from("last")));
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn test_values_are_never_coerced() {
        // Numeric-looking field values stay strings
        let payload = merge_fields(pairs(&[("age", "30")]));
        assert_eq!(payload.get("age"), Some(&Value::from("30")));
    }

    #[test]
    fn test_identical_submissions_build_identical_payloads() {
        let fields = pairs(&[("name", "alice"), ("age", "30")]);
        assert_eq!(merge_fields(fields.clone()), merge_fields(fields));
    }

    #[test]
    fn test_success_message_format() {
        let value = serde_json::json!({ "result": "approved" });
        assert_eq!(
            success_message(&value),
            r#"Evaluation Result: {"result":"approved"}"#
        );
    }

    #[test]
    fn test_error_message_format() {
        let msg = error_message("Request failed: 500");
        assert!(msg.starts_with("An error occurred during evaluation: "));
        assert!(msg.ends_with("Request failed: 500"));
    }
}
