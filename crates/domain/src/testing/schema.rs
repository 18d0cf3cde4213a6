//! Response shape contracts.
//!
//! A small JSON-Schema subset: `type`, `properties`, `required` and `items`,
//! nested to any depth. Other keywords are accepted and ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Runtime kind of a JSON value named by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number without a fractional part.
    Integer,
    /// JSON boolean.
    Boolean,
    /// JSON null.
    Null,
}

impl SchemaType {
    /// Returns the keyword spelling of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Returns true if `value` is of this kind.
    ///
    /// Strings never count as numbers, whatever their content.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            other => Err(DomainError::invalid_spec(format!(
                "unsupported schema type '{other}'"
            ))),
        }
    }
}

/// Name of the runtime kind of a JSON value, for diagnostics.
#[must_use]
pub const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parsed schema node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonSchema {
    types: Vec<SchemaType>,
    properties: BTreeMap<String, JsonSchema>,
    required: Vec<String>,
    items: Option<Box<JsonSchema>>,
}

impl JsonSchema {
    /// A schema accepting any value.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// A schema accepting values of one type.
    #[must_use]
    pub fn of_type(kind: SchemaType) -> Self {
        Self {
            types: vec![kind],
            ..Self::default()
        }
    }

    /// Adds a declared property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Self) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Adds a required member name.
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Sets the schema applied to every array element.
    #[must_use]
    pub fn with_items(mut self, schema: Self) -> Self {
        self.items = Some(Box::new(schema));
        self
    }

    /// Accepted types; empty means any type.
    #[must_use]
    pub fn types(&self) -> &[SchemaType] {
        &self.types
    }

    /// Declared properties.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, Self> {
        &self.properties
    }

    /// Required member names.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Element schema for arrays.
    #[must_use]
    pub fn items(&self) -> Option<&Self> {
        self.items.as_deref()
    }

    /// Returns true if `value` is of an accepted type.
    #[must_use]
    pub fn accepts_type(&self, value: &Value) -> bool {
        self.types.is_empty() || self.types.iter().any(|t| t.matches(value))
    }

    /// Parses a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSpec`] for an unknown type name, a
    /// malformed keyword, or a tuple-form `items`.
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        Self::parse_node(value, "#")
    }

    fn parse_node(value: &Value, at: &str) -> DomainResult<Self> {
        let Value::Object(node) = value else {
            return Err(invalid(at, "schema must be an object"));
        };

        let types = match node.get("type") {
            None => Vec::new(),
            Some(Value::String(name)) => vec![name.parse::<SchemaType>()?],
            Some(Value::Array(names)) => names
                .iter()
                .map(|name| match name {
                    Value::String(name) => name.parse::<SchemaType>(),
                    _ => Err(invalid(at, "'type' entries must be strings")),
                })
                .collect::<DomainResult<_>>()?,
            Some(_) => return Err(invalid(at, "'type' must be a string or an array of strings")),
        };

        let properties = match node.get("properties") {
            None => BTreeMap::new(),
            Some(Value::Object(members)) => members
                .iter()
                .map(|(name, sub)| {
                    let sub_at = format!("{at}/properties/{name}");
                    Ok((name.clone(), Self::parse_node(sub, &sub_at)?))
                })
                .collect::<DomainResult<_>>()?,
            Some(_) => return Err(invalid(at, "'properties' must be an object")),
        };

        let required = match node.get("required") {
            None => Vec::new(),
            Some(Value::Array(names)) => names
                .iter()
                .map(|name| {
                    name.as_str()
                        .map(ToString::to_string)
                        .ok_or_else(|| invalid(at, "'required' entries must be strings"))
                })
                .collect::<DomainResult<_>>()?,
            Some(_) => return Err(invalid(at, "'required' must be an array of strings")),
        };

        let items = match node.get("items") {
            None => None,
            Some(sub @ Value::Object(_)) => {
                Some(Box::new(Self::parse_node(sub, &format!("{at}/items"))?))
            }
            Some(Value::Array(_)) => {
                return Err(invalid(at, "tuple-form 'items' is not supported"));
            }
            Some(_) => return Err(invalid(at, "'items' must be an object")),
        };

        Ok(Self {
            types,
            properties,
            required,
            items,
        })
    }

    /// Renders the schema back to its JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut node = serde_json::Map::new();
        match self.types.as_slice() {
            [] => {}
            [single] => {
                node.insert("type".into(), Value::String(single.as_str().into()));
            }
            many => {
                node.insert(
                    "type".into(),
                    Value::Array(many.iter().map(|t| Value::String(t.as_str().into())).collect()),
                );
            }
        }
        if !self.required.is_empty() {
            node.insert(
                "required".into(),
                Value::Array(self.required.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.properties.is_empty() {
            node.insert(
                "properties".into(),
                Value::Object(
                    self.properties
                        .iter()
                        .map(|(name, sub)| (name.clone(), sub.to_json()))
                        .collect(),
                ),
            );
        }
        if let Some(items) = &self.items {
            node.insert("items".into(), items.to_json());
        }
        Value::Object(node)
    }
}

fn invalid(at: &str, message: &str) -> DomainError {
    DomainError::invalid_spec(format!("invalid JSON schema at {at}: {message}"))
}

impl Serialize for JsonSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
