//! Movie load schema: turns an untrusted JSON payload into a [`NewMovie`]
//! or a field → messages map.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::database::models::{MoviePatch, NewMovie};
use crate::types::MAX_STRING_LENGTH;

/// Validation failures keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const UNKNOWN: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_NUMBER: &str = "Not a valid number.";
pub const INVALID_INTEGER: &str = "Not a valid integer.";
pub const SPECIAL_NUMBER: &str = "Special numeric values (nan or infinity) are not permitted.";
pub const TOO_LARGE: &str = "Number too large.";

/// Key under which errors about the payload as a whole are reported
pub const SCHEMA_KEY: &str = "_schema";

const FIELDS: [&str; 6] = ["id", "name", "description", "price", "inventory_quantity", "image"];

/// Parse and validate a create payload.
///
/// All problems are collected in one pass. `id` is accepted and ignored.
pub fn load_new_movie(input: &Value) -> Result<NewMovie, FieldErrors> {
    let Some(object) = input.as_object() else {
        let mut errors = FieldErrors::new();
        push(&mut errors, SCHEMA_KEY, INVALID_INPUT);
        return Err(errors);
    };

    let mut errors = FieldErrors::new();

    for key in object.keys().filter(|k| !FIELDS.contains(&k.as_str())) {
        push(&mut errors, key, UNKNOWN);
    }

    let name = required(object, "name", load_string, &mut errors);
    let description = optional(object, "description", load_string, &mut errors);
    let price = required(object, "price", load_float, &mut errors);
    let inventory_quantity = required(object, "inventory_quantity", load_integer, &mut errors);
    let image = optional(object, "image", load_string, &mut errors);

    match (name, price, inventory_quantity) {
        (Some(name), Some(price), Some(inventory_quantity)) if errors.is_empty() => Ok(NewMovie {
            name,
            description,
            price,
            inventory_quantity,
            image,
        }),
        _ => Err(errors),
    }
}

/// Convert an update payload into a [`MoviePatch`].
///
/// Only the keys present are converted, without required or length rules.
/// Numeric strings and integral floats are accepted the way the store would
/// coerce them; a value that has no column representation is an error.
/// Unknown keys are ignored.
pub fn load_patch(input: &Value) -> Result<MoviePatch, FieldErrors> {
    let Some(object) = input.as_object() else {
        let mut errors = FieldErrors::new();
        push(&mut errors, SCHEMA_KEY, INVALID_INPUT);
        return Err(errors);
    };

    let mut errors = FieldErrors::new();
    let patch = MoviePatch {
        name: present(object, "name", load_text, &mut errors),
        description: nullable(object, "description", load_text, &mut errors),
        price: present(object, "price", load_float, &mut errors),
        inventory_quantity: present(object, "inventory_quantity", load_integer, &mut errors),
        image: nullable(object, "image", load_text, &mut errors),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// One-line rendering of a field error map, e.g. `price: Not a valid number.`
pub fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.entry(field.to_string()).or_default().push(message.to_string());
}

fn required<T>(
    object: &Map<String, Value>,
    field: &str,
    load: fn(&Value) -> Result<T, &'static str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    match object.get(field) {
        None => {
            push(errors, field, MISSING);
            None
        }
        Some(Value::Null) => {
            push(errors, field, NULL);
            None
        }
        Some(value) => load(value).map_err(|msg| push(errors, field, msg)).ok(),
    }
}

fn optional<T>(
    object: &Map<String, Value>,
    field: &str,
    load: fn(&Value) -> Result<T, &'static str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => load(value).map_err(|msg| push(errors, field, msg)).ok(),
    }
}

fn present<T>(
    object: &Map<String, Value>,
    field: &str,
    load: fn(&Value) -> Result<T, &'static str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    match object.get(field) {
        None => None,
        Some(Value::Null) => {
            push(errors, field, NULL);
            None
        }
        Some(value) => load(value).map_err(|msg| push(errors, field, msg)).ok(),
    }
}

fn nullable<T>(
    object: &Map<String, Value>,
    field: &str,
    load: fn(&Value) -> Result<T, &'static str>,
    errors: &mut FieldErrors,
) -> Option<Option<T>> {
    match object.get(field) {
        None => None,
        Some(Value::Null) => Some(None),
        Some(value) => load(value).map(Some).map_err(|msg| push(errors, field, msg)).ok(),
    }
}

// Scalars are stored as their text; no length limit is applied here.
fn load_text(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(INVALID_STRING),
    }
}

fn load_string(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LENGTH => Err("Longer than maximum length 255."),
        Value::String(s) => Ok(s.clone()),
        _ => Err(INVALID_STRING),
    }
}

fn load_float(value: &Value) -> Result<f64, &'static str> {
    let number = match value {
        Value::Number(n) => n.as_f64().ok_or(INVALID_NUMBER)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| INVALID_NUMBER)?,
        _ => return Err(INVALID_NUMBER),
    };
    if !number.is_finite() {
        return Err(SPECIAL_NUMBER);
    }
    Ok(number)
}

// Fractional values are truncated toward zero.
fn load_integer(value: &Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Err(TOO_LARGE)
            } else {
                let f = n.as_f64().ok_or(INVALID_INTEGER)?;
                let truncated = f.trunc();
                if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                    Err(TOO_LARGE)
                } else {
                    Ok(truncated as i64)
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| INVALID_INTEGER),
        _ => Err(INVALID_INTEGER),
    }
}
