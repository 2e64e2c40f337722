//! Typed, defaulted component properties.

use crate::error::EngineError;
use crate::value::Value;
use dskit_domain::constants::RESERVED_PROPS;
use fxhash::FxHashMap;
use std::fmt;

/// Declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    Str,
    Bool,
    Int,
    Float,
    /// A string restricted to the listed values.
    Enum(&'static [&'static str]),
}

impl PropType {
    /// Reads `value` as this type. Only conversions that keep the meaning are made;
    /// `None` means the value is incompatible.
    #[must_use]
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::Str, Value::Str(_)) => Some(value.clone()),
            (Self::Str, Value::Int(_) | Value::Float(_) | Value::Bool(_)) => {
                Some(Value::Str(value.to_string()))
            },

            (Self::Bool, Value::Bool(_)) => Some(value.clone()),
            (Self::Bool, Value::Int(0)) => Some(Value::Bool(false)),
            (Self::Bool, Value::Int(1)) => Some(Value::Bool(true)),
            (Self::Bool, Value::Str(s)) => parse_flag(s).map(Value::Bool),

            (Self::Int, Value::Int(_)) => Some(value.clone()),
            (Self::Int, Value::Str(s)) => s.parse::<i64>().ok().map(Value::Int),

            (Self::Float, Value::Float(_) | Value::Int(_)) => value.as_float().map(Value::Float),
            (Self::Float, Value::Str(s)) => {
                s.parse::<f64>().ok().filter(|f| f.is_finite()).map(Value::Float)
            },

            (Self::Enum(allowed), Value::Str(s)) if allowed.contains(&s.as_str()) => {
                Some(value.clone())
            },

            _ => None,
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => f.write_str("string"),
            Self::Bool => f.write_str("boolean"),
            Self::Int => f.write_str("integer"),
            Self::Float => f.write_str("number"),
            Self::Enum(allowed) => write!(f, "one of [{}]", allowed.join(", ")),
        }
    }
}

/// Attribute-style flags: a bare attribute (`""`) means `true`.
fn parse_flag(raw: &str) -> Option<bool> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

/// One declared property: name, type and default.
///
/// A `Null` default makes the property optional (callers may also pass `Null`).
#[derive(Debug, Clone, PartialEq)]
pub struct PropSpec {
    name: &'static str,
    ty: PropType,
    default: Value,
}

impl PropSpec {
    /// Optional string, `Null` by default.
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self { name, ty: PropType::Str, default: Value::Null }
    }

    /// Flag, `false` by default.
    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self { name, ty: PropType::Bool, default: Value::Bool(false) }
    }

    /// Integer, `0` by default.
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self { name, ty: PropType::Int, default: Value::Int(0) }
    }

    /// Number, `0.0` by default.
    #[must_use]
    pub const fn number(name: &'static str) -> Self {
        Self { name, ty: PropType::Float, default: Value::Float(0.0) }
    }

    /// One of `allowed`, defaulting to the first entry.
    #[must_use]
    pub fn one_of(name: &'static str, allowed: &'static [&'static str]) -> Self {
        let default = allowed.first().map_or(Value::Null, |first| Value::from(*first));
        Self { name, ty: PropType::Enum(allowed), default }
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.default = Value::Null;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn ty(&self) -> PropType {
        self.ty
    }

    #[must_use]
    pub const fn default(&self) -> &Value {
        &self.default
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.default.is_null()
    }

    fn accept(&self, component: &str, value: &Value) -> Result<Value, EngineError> {
        if value.is_null() && self.is_optional() {
            return Ok(Value::Null);
        }
        self.ty.coerce(value).ok_or_else(|| EngineError::InvalidPropertyType {
            component: component.to_owned(),
            property: self.name.to_owned(),
            expected: self.ty.to_string(),
            found: value.describe(),
            context: None,
        })
    }
}

/// Ordered property declarations of a component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropSchema {
    specs: Vec<PropSpec>,
}

impl PropSchema {
    /// Builds a schema, rejecting reserved or repeated names, malformed names
    /// and defaults that do not match their declared type.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidDefinition`] describing the first offending property.
    pub fn new(specs: impl IntoIterator<Item = PropSpec>) -> Result<Self, EngineError> {
        let specs: Vec<PropSpec> = specs.into_iter().collect();

        for (i, spec) in specs.iter().enumerate() {
            let invalid = |message: String| EngineError::InvalidDefinition {
                message: message.into(),
                context: None,
            };

            if !is_prop_name(spec.name) {
                return Err(invalid(format!("invalid property name '{}'", spec.name)));
            }
            if RESERVED_PROPS.contains(&spec.name) {
                return Err(invalid(format!("property name '{}' is reserved", spec.name)));
            }
            if specs[..i].iter().any(|other| other.name == spec.name) {
                return Err(invalid(format!("property '{}' declared twice", spec.name)));
            }
            if !spec.is_optional() && spec.ty.coerce(&spec.default).as_ref() != Some(&spec.default)
            {
                return Err(invalid(format!(
                    "default {} of property '{}' is not a {}",
                    spec.default.describe(),
                    spec.name,
                    spec.ty
                )));
            }
        }

        Ok(Self { specs })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropSpec> {
        self.specs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Produces the fully defaulted bag for one render call.
    ///
    /// Every declared property absent from `raw` takes its default; present values are
    /// coerced to the declared type.
    ///
    /// # Errors
    /// * [`EngineError::UnknownProperty`] for a key the schema does not declare.
    /// * [`EngineError::InvalidPropertyType`] for a value that does not fit its type.
    pub fn apply(&self, component: &str, raw: &PropertyBag) -> Result<PropertyBag, EngineError> {
        let mut unknown: Vec<&str> = raw.keys().filter(|key| !self.contains(key)).collect();
        unknown.sort_unstable();
        if let Some(property) = unknown.first() {
            return Err(EngineError::UnknownProperty {
                component: component.to_owned(),
                property: (*property).to_owned(),
                context: None,
            });
        }

        let mut bag = PropertyBag::with_capacity(self.specs.len());
        for spec in &self.specs {
            let value = match raw.get(spec.name) {
                Some(value) => spec.accept(component, value)?,
                None => spec.default.clone(),
            };
            bag.insert(spec.name, value);
        }
        Ok(bag)
    }
}

fn is_prop_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.ends_with('-')
}

/// Property name → value, supplied per render call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    values: FxHashMap<String, Value>,
}

impl PropertyBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()) }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value of `name`, or `""` when absent, `Null` or not a string.
    #[must_use]
    pub fn str(&self, name: &str) -> &str {
        self.get(name).and_then(Value::as_str).unwrap_or_default()
    }

    /// Non-empty string value of `name`.
    #[must_use]
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        Some(self.str(name)).filter(|s| !s.is_empty())
    }

    /// Truthiness of `name` (absent is `false`).
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::is_truthy)
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    #[must_use]
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}
