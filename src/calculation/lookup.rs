//! Optional nested lookup over untrusted JSON.
//!
//! A [`Node`] is either a present value or absent. Every accessor on an
//! absent node yields another absent node, so long paths compose without
//! conditionals and never panic. JSON `null` counts as absent.

use rust_decimal::Decimal;
use serde_json::Value;

use super::text::clean_text;
use crate::core::money::{parse_currency, parse_number};

#[derive(Debug, Clone, Copy, Default)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            value: Some(value).filter(|v| !v.is_null()),
        }
    }

    pub fn absent() -> Self {
        Self { value: None }
    }

    /// Object member `key`.
    pub fn get(self, key: &str) -> Self {
        Self {
            value: self
                .value
                .and_then(|v| v.get(key))
                .filter(|v| !v.is_null()),
        }
    }

    /// Follow a path of object members.
    pub fn at(self, path: &[&str]) -> Self {
        path.iter().fold(self, |node, key| node.get(key))
    }

    /// First element of an array, or the node itself for a single record.
    pub fn first(self) -> Self {
        match self.value {
            Some(Value::Array(items)) => items.first().map(Node::new).unwrap_or_default(),
            _ => self,
        }
    }

    /// This node if present, otherwise `other`.
    pub fn or(self, other: Node<'a>) -> Self {
        if self.is_present() { self } else { other }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Present and not `false`, `0` or `""`.
    pub fn is_truthy(&self) -> bool {
        match self.value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(_) => true,
        }
    }

    pub fn value(self) -> Option<&'a Value> {
        self.value
    }

    /// Records of a field that may hold a single record or a list of them.
    /// Falsy values give an empty list; `null` entries are dropped.
    pub fn list(self) -> Vec<Node<'a>> {
        if !self.is_truthy() {
            return Vec::new();
        }
        match self.value {
            Some(Value::Array(items)) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(Node::new)
                .collect(),
            _ => vec![self],
        }
    }

    pub fn number(self) -> Option<Decimal> {
        self.value.and_then(parse_number)
    }

    /// Number, or zero when absent or unparsable.
    pub fn currency(self) -> Decimal {
        self.value.map(parse_currency).unwrap_or(Decimal::ZERO)
    }

    /// Non-empty string value.
    pub fn text(self) -> Option<&'a str> {
        match self.value {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Non-empty string, or a number rendered as text.
    pub fn display_text(self) -> Option<String> {
        match self.value {
            Some(Value::Number(n)) if self.is_truthy() => Some(n.to_string()),
            _ => self.text().map(str::to_string),
        }
    }

    /// String value passed through [`clean_text`].
    pub fn clean_text(self) -> Option<String> {
        match self.value {
            Some(Value::String(s)) => clean_text(s),
            _ => None,
        }
    }
}
