//! Normalization of the backends' loosely-shaped JSON payloads.
//!
//! The identity backend has answered "who am I" in several layouts over
//! time. Each layout is a matcher in [`AUTH_SHAPES`]; they are tried in
//! order and the first match wins. Directory payloads carry their success
//! flag and data either under `message` or at the top level.

use serde_json::Value;
use tracing::{debug, warn};

use envgate_core::{AuthStatus, Environment, User};

type ShapeMatcher = fn(&Value) -> Option<User>;

/// Known "who am I" layouts, in priority order
pub const AUTH_SHAPES: &[(&str, ShapeMatcher)] = &[
    ("message.success+user", message_success_user),
    ("message.authenticated+user", message_authenticated_user),
    ("message-as-user", message_as_user),
    ("top-level authenticated+user", top_level_user),
];

/// Map a "who am I" body onto [`AuthStatus`]
pub fn auth_status(body: &Value) -> AuthStatus {
    for (shape, matcher) in AUTH_SHAPES {
        if let Some(user) = matcher(body) {
            debug!("Session payload matched shape {}", shape);
            return AuthStatus::authenticated(user);
        }
    }
    debug!("Session payload matched no authenticated shape");
    AuthStatus::anonymous()
}

/// Truthiness as the backend's JavaScript consumers understand it
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn parse_user(value: &Value) -> Option<User> {
    if !value.is_object() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Ignoring malformed user object: {}", e);
            None
        }
    }
}

fn message_success_user(body: &Value) -> Option<User> {
    let message = body.get("message")?;
    if truthy(message.get("success")) && truthy(message.get("user")) {
        parse_user(message.get("user")?)
    } else {
        None
    }
}

fn message_authenticated_user(body: &Value) -> Option<User> {
    let message = body.get("message")?;
    if truthy(message.get("authenticated")) && truthy(message.get("user")) {
        parse_user(message.get("user")?)
    } else {
        None
    }
}

fn message_as_user(body: &Value) -> Option<User> {
    let message = body.get("message").filter(|m| m.is_object())?;
    let email = non_empty_str(message, "email")?;

    let field = |key: &str| non_empty_str(message, key).unwrap_or("").to_string();
    Some(User {
        email: email.to_string(),
        first_name: field("first_name"),
        last_name: field("last_name"),
        full_name: non_empty_str(message, "full_name")
            .or_else(|| non_empty_str(message, "name"))
            .unwrap_or("")
            .to_string(),
        user_image: non_empty_str(message, "user_image").map(str::to_string),
    })
}

fn top_level_user(body: &Value) -> Option<User> {
    if truthy(body.get("authenticated")) && truthy(body.get("user")) {
        parse_user(body.get("user")?)
    } else {
        None
    }
}

/// Success flag under `message` or at the top level
pub fn is_success(body: &Value) -> bool {
    truthy(body.get("message").and_then(|m| m.get("success"))) || truthy(body.get("success"))
}

/// Backend-supplied failure text, if any
pub fn failure_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(|m| non_empty_str(m, "message"))
        .map(str::to_string)
}

/// Name assigned to a freshly created environment
pub fn created_environment_name(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(|m| non_empty_str(m, "environment_name"))
        .or_else(|| non_empty_str(body, "environment_name"))
        .map(str::to_string)
}

/// Environment list from `message`, falling back to the body itself.
/// Entries that do not decode are skipped.
pub fn environment_list(body: &Value) -> Vec<Environment> {
    let candidate = match body.get("message") {
        Some(message) if truthy(Some(message)) => message,
        _ => body,
    };

    let Some(items) = candidate.as_array() else {
        debug!("Environment payload is not a list");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Environment>(item.clone()) {
            Ok(env) => Some(env),
            Err(e) => {
                warn!("Skipping malformed environment entry: {}", e);
                None
            }
        })
        .collect()
}
