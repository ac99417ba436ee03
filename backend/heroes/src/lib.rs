//! # Heroes
//!
//! Shared hero record and the contract with the upstream hero API.
//!
//! ## Normalization
//!
//! The upstream API is loosely typed, so every record goes through [`Hero::from_raw`]
//! before it leaves the backend:
//! - `id` is coerced to a number, using the same rules a browser applies to `Number(x)`
//! - Everything else is copied as is, absent fields stay absent
//! - Anything that cannot become a number (objects, gibberish strings) is sent as `null`
//!
//! ## Upstream Shapes
//!
//! Listing (`GET /ping`)
//! ```json
//! { "data": [ { "id": "7", "heroName": "Tigreal", ... } ] }
//! ```
//!
//! Search (`POST /echo`)
//! ```json
//! { "ok": true, "hero": { "id": 3, "heroName": "Karina", ... } }
//! ```
//!
//! Search only ever yields a single hero. That is the upstream contract, we do not fan out.
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

pub mod remote;

pub use remote::{Upstream, UpstreamBody, UpstreamError, UpstreamReply};

pub const HERO_ID: &str = "id";
pub const HERO_NAME: &str = "heroName";
pub const HERO_ROLE: &str = "role";
pub const HERO_PICK_RATE: &str = "pickRate";
pub const HERO_DESCRIPTION: &str = "description";
pub const HERO_IMAGE: &str = "heroImage";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default)]
    pub id: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_rate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<Value>,
}

impl Hero {
    /// Builds a hero out of one raw upstream object. Non-objects behave like an empty object.
    pub fn from_raw(raw: &Value) -> Self {
        let field = |name: &str| raw.get(name).cloned();

        Self {
            id: to_number(raw.get(HERO_ID)),
            hero_name: field(HERO_NAME),
            role: field(HERO_ROLE),
            pick_rate: field(HERO_PICK_RATE),
            description: field(HERO_DESCRIPTION),
            hero_image: field(HERO_IMAGE),
        }
    }

    pub fn name(&self) -> Cow<'_, str> {
        display(self.hero_name.as_ref())
    }

    pub fn role_label(&self) -> Cow<'_, str> {
        display(self.role.as_ref())
    }

    pub fn pick_rate_label(&self) -> Cow<'_, str> {
        display(self.pick_rate.as_ref())
    }

    pub fn description_text(&self) -> Cow<'_, str> {
        display(self.description.as_ref())
    }

    pub fn image(&self) -> Cow<'_, str> {
        display(self.hero_image.as_ref())
    }
}

/// Listing response -> heroes, in upstream order.
pub fn heroes_from_listing(response: &Value) -> Vec<Hero> {
    match response.get("data") {
        Some(Value::Array(items)) => items.iter().map(Hero::from_raw).collect(),
        // truthy but not a list: nothing to normalize, so no heroes rather than an error
        Some(data) if truthy(data) => {
            warn!("Listing data is not a list, treating as empty: {data}");
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Search response -> zero or one hero.
pub fn hero_from_search(response: &Value) -> Vec<Hero> {
    let ok = response.get("ok").is_some_and(truthy);

    match response.get("hero") {
        Some(hero) if ok && truthy(hero) => vec![Hero::from_raw(hero)],
        _ => Vec::new(),
    }
}

pub fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.contains("application/json"))
}

/// Browser truthiness of a JSON value.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `Number(x)` for a JSON value. `None` stands for NaN, which serializes as `null`.
///
/// An absent field is `undefined`, not `null`, and coerces to NaN.
pub fn to_number(value: Option<&Value>) -> Option<Number> {
    let value = value?;

    let float = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric(s)?,
        Value::Array(_) => parse_numeric(&primitive_string(value))?,
        Value::Object(_) => return None,
    };

    from_f64(float)
}

fn from_f64(float: f64) -> Option<Number> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;

    if !float.is_finite() {
        return None;
    }

    if float.fract() == 0.0 && float.abs() <= MAX_SAFE {
        return Some(Number::from(float as i64));
    }

    Number::from_f64(float)
}

fn parse_numeric(input: &str) -> Option<f64> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }

            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // Rust also accepts "inf" and "nan", which a browser rejects
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    trimmed.parse().ok()
}

fn primitive_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(primitive_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn display(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(primitive_string(other)),
    }
}
