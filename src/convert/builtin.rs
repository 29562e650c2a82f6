//! Built-in converters.
//!
//! Each converter recognizes exactly one input shape and returns
//! [`Error::TypeNotSupported`] for everything else.

use super::error::Error;
use super::input::{CaptureBuffer, Stream};
use super::registry::Converter;
use crate::k8s::{Unstructured, UnstructuredList};
use crate::value::{Canonical, Map, Value};
use serde_json::value::RawValue;
use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Returns the built-in converters in their default trial order.
pub fn converters() -> Vec<Converter> {
    let converters: [Converter; 10] = [
        Arc::new(string_converter),
        Arc::new(byte_slice_converter),
        Arc::new(raw_json_converter),
        Arc::new(capture_buffer_converter),
        Arc::new(stream_converter),
        Arc::new(unstructured_converter),
        Arc::new(unstructured_ref_converter),
        Arc::new(unstructured_list_converter),
        Arc::new(map_converter),
        Arc::new(sequence_converter),
    ];
    Vec::from(converters)
}

/// Decodes a JSON document that must have a mapping or sequence at its root.
pub fn decode_json_document(data: &[u8]) -> Result<Value, Error> {
    if data.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let decoded: serde_json::Value = serde_json::from_slice(data).map_err(Error::Decode)?;
    let value = Value::from(decoded);
    if !value.is_container() {
        return Err(Error::NotAContainer);
    }

    Ok(value)
}

/// Converts text holding a JSON document.
pub fn string_converter(input: &dyn Any) -> Result<Value, Error> {
    if let Some(s) = input.downcast_ref::<String>() {
        return decode_json_document(s.as_bytes());
    }
    if let Some(s) = input.downcast_ref::<&'static str>() {
        return decode_json_document(s.as_bytes());
    }
    Err(Error::TypeNotSupported)
}

/// Converts raw bytes holding a JSON document.
pub fn byte_slice_converter(input: &dyn Any) -> Result<Value, Error> {
    if let Some(b) = input.downcast_ref::<Vec<u8>>() {
        return decode_json_document(b);
    }
    if let Some(b) = input.downcast_ref::<&'static [u8]>() {
        return decode_json_document(b);
    }
    Err(Error::TypeNotSupported)
}

/// Converts bytes already tagged as raw JSON.
pub fn raw_json_converter(input: &dyn Any) -> Result<Value, Error> {
    let raw = input
        .downcast_ref::<Box<RawValue>>()
        .ok_or(Error::TypeNotSupported)?;
    decode_json_document(raw.get().as_bytes())
}

/// Converts whatever a [`CaptureBuffer`] has recorded so far.
pub fn capture_buffer_converter(input: &dyn Any) -> Result<Value, Error> {
    let buffer = input
        .downcast_ref::<CaptureBuffer>()
        .ok_or(Error::TypeNotSupported)?;
    decode_json_document(&buffer.contents())
}

/// Drains a [`Stream`] and converts its contents.
pub fn stream_converter(input: &dyn Any) -> Result<Value, Error> {
    let stream = input
        .downcast_ref::<Stream>()
        .ok_or(Error::TypeNotSupported)?;
    let data = stream.read_all().map_err(Error::Read)?;
    decode_json_document(&data)
}

/// Returns the backing map of an [`Unstructured`] object.
pub fn unstructured_converter(input: &dyn Any) -> Result<Value, Error> {
    let u = input
        .downcast_ref::<Unstructured>()
        .ok_or(Error::TypeNotSupported)?;
    Ok(Value::Map(u.object.clone()))
}

/// Returns the backing map of a shared or boxed [`Unstructured`] object.
pub fn unstructured_ref_converter(input: &dyn Any) -> Result<Value, Error> {
    let u: &Unstructured = if let Some(b) = input.downcast_ref::<Box<Unstructured>>() {
        b
    } else if let Some(a) = input.downcast_ref::<Arc<Unstructured>>() {
        a
    } else if let Some(r) = input.downcast_ref::<Rc<Unstructured>>() {
        r
    } else {
        return Err(Error::TypeNotSupported);
    };
    Ok(Value::Map(u.object.clone()))
}

/// Returns the backing maps of every item of an [`UnstructuredList`], in order.
pub fn unstructured_list_converter(input: &dyn Any) -> Result<Value, Error> {
    let list: &UnstructuredList = if let Some(l) = input.downcast_ref::<UnstructuredList>() {
        l
    } else if let Some(b) = input.downcast_ref::<Box<UnstructuredList>>() {
        b
    } else if let Some(a) = input.downcast_ref::<Arc<UnstructuredList>>() {
        a
    } else {
        return Err(Error::TypeNotSupported);
    };

    Ok(Value::List(
        list.items
            .iter()
            .map(|item| Value::Map(item.object.clone()))
            .collect(),
    ))
}

/// Passes generic string-keyed mappings through unchanged.
pub fn map_converter(input: &dyn Any) -> Result<Value, Error> {
    if let Some(m) = input.downcast_ref::<Map>() {
        return Ok(Value::Map(m.clone()));
    }
    if let Some(m) = input.downcast_ref::<HashMap<String, Value>>() {
        return Ok(Value::Map(
            m.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        ));
    }
    if let Some(v @ Value::Map(_)) = input.downcast_ref::<Value>() {
        return Ok(v.clone());
    }
    if let Some(c @ Canonical::Map(_)) = input.downcast_ref::<Canonical>() {
        return Ok(Value::from(c.clone()));
    }
    if let Some(m) = input.downcast_ref::<serde_json::Map<String, serde_json::Value>>() {
        return Ok(Value::from(serde_json::Value::Object(m.clone())));
    }
    if let Some(j @ serde_json::Value::Object(_)) = input.downcast_ref::<serde_json::Value>() {
        return Ok(Value::from(j.clone()));
    }
    Err(Error::TypeNotSupported)
}

/// Passes generic sequences through unchanged. Byte sequences are left to
/// [`byte_slice_converter`].
pub fn sequence_converter(input: &dyn Any) -> Result<Value, Error> {
    if let Some(l) = input.downcast_ref::<Vec<Value>>() {
        return Ok(Value::List(l.clone()));
    }
    if let Some(v @ Value::List(_)) = input.downcast_ref::<Value>() {
        return Ok(v.clone());
    }
    if let Some(l) = input.downcast_ref::<Vec<Canonical>>() {
        return Ok(Value::List(l.iter().cloned().map(Value::from).collect()));
    }
    if let Some(c @ Canonical::List(_)) = input.downcast_ref::<Canonical>() {
        return Ok(Value::from(c.clone()));
    }
    if let Some(l) = input.downcast_ref::<Vec<serde_json::Value>>() {
        return Ok(Value::from(serde_json::Value::Array(l.clone())));
    }
    if let Some(j @ serde_json::Value::Array(_)) = input.downcast_ref::<serde_json::Value>() {
        return Ok(Value::from(j.clone()));
    }
    Err(Error::TypeNotSupported)
}
