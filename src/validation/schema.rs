//! Schema combinators over `serde_json::Value`.
//!
//! Schemas are built from primitives (`string()`, `number()`, `boolean()`,
//! `object()`) and wrappers (`nullable`, `optional`, `array`). Checking a value
//! collects every violation instead of stopping at the first one.

use super::issues::{Issue, IssueCode, PathSegment, ValidationErrors};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\A[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\z")
        .expect("email pattern compiles")
});

/// UTC only, uppercase `T` and `Z`, optional fractional seconds.
static DATETIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?Z\z").expect("datetime pattern compiles")
});

/// 2^64; integral values at or above this do not fit in a `u64`.
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringFormat {
    Email,
    Uuid,
    DateTime,
}

#[derive(Clone, Debug, Default)]
pub struct StringSchema {
    min: Option<usize>,
    max: Option<usize>,
    format: Option<StringFormat>,
}

impl StringSchema {
    /// Minimum length in characters.
    pub fn min(mut self, n: usize) -> Self {
        self.min = Some(n);
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, n: usize) -> Self {
        self.max = Some(n);
        self
    }

    pub fn email(mut self) -> Self {
        self.format = Some(StringFormat::Email);
        self
    }

    /// Hyphenated UUID, e.g. `123e4567-e89b-12d3-a456-426614174000`.
    pub fn uuid(mut self) -> Self {
        self.format = Some(StringFormat::Uuid);
        self
    }

    /// UTC timestamp, e.g. `2021-01-01T00:00:00.000Z`. Offsets are rejected.
    pub fn datetime(mut self) -> Self {
        self.format = Some(StringFormat::DateTime);
        self
    }

    fn check(&self, s: &str, path: &[PathSegment], errors: &mut ValidationErrors) {
        let len = s.chars().count();
        if let Some(min) = self.min {
            if len < min {
                errors.push(Issue::new(
                    path,
                    IssueCode::TooSmall,
                    format!("String must contain at least {} character(s)", min),
                ));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                errors.push(Issue::new(
                    path,
                    IssueCode::TooBig,
                    format!("String must contain at most {} character(s)", max),
                ));
            }
        }
        match self.format {
            Some(StringFormat::Email) if !EMAIL_RE.is_match(s) => {
                errors.push(Issue::new(path, IssueCode::InvalidString, "Invalid email"));
            }
            Some(StringFormat::Uuid) if s.len() != 36 || uuid::Uuid::parse_str(s).is_err() => {
                errors.push(Issue::new(path, IssueCode::InvalidString, "Invalid uuid"));
            }
            Some(StringFormat::DateTime)
                if !DATETIME_RE.is_match(s) || chrono::DateTime::parse_from_rfc3339(s).is_err() =>
            {
                errors.push(Issue::new(path, IssueCode::InvalidString, "Invalid datetime"));
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NumberSchema {
    int: bool,
    min: Option<f64>,
}

impl NumberSchema {
    pub fn int(mut self) -> Self {
        self.int = true;
        self
    }

    pub fn nonnegative(mut self) -> Self {
        self.min = Some(0.0);
        self
    }

    fn check(&self, n: &Number, path: &[PathSegment], errors: &mut ValidationErrors) {
        let v = n.as_f64().unwrap_or(0.0);
        let integral = n.is_i64() || n.is_u64() || v.fract() == 0.0;
        if self.int && !integral {
            errors.push(Issue::new(path, IssueCode::NotInteger, "Expected integer, received float"));
        }
        if self.int && integral && n.is_f64() {
            if v >= U64_BOUND {
                errors.push(Issue::new(
                    path,
                    IssueCode::TooBig,
                    format!("Number must be less than or equal to {}", u64::MAX),
                ));
            } else if v < i64::MIN as f64 {
                errors.push(Issue::new(
                    path,
                    IssueCode::TooSmall,
                    format!("Number must be greater than or equal to {}", i64::MIN),
                ));
            }
        }
        if let Some(min) = self.min {
            if v < min {
                errors.push(Issue::new(
                    path,
                    IssueCode::TooSmall,
                    format!("Number must be greater than or equal to {}", min),
                ));
            }
        }
    }
}

/// Ordered set of named fields. Keys not listed are ignored.
#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
}

impl ObjectSchema {
    pub fn field(mut self, name: &str, schema: impl Into<Schema>) -> Self {
        self.fields.push((name.to_string(), schema.into()));
        self
    }

    /// Every field becomes optional.
    pub fn partial(self) -> Self {
        ObjectSchema {
            fields: self
                .fields
                .into_iter()
                .map(|(name, schema)| match schema {
                    Schema::Optional(_) => (name, schema),
                    other => (name, other.optional()),
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Build an object from string pairs (query string, path params), turning
    /// values of numeric and boolean fields into JSON numbers/booleans when they
    /// parse. Values that do not parse stay strings so validation reports them.
    pub fn coerce_strings<I>(&self, pairs: I) -> Value
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = Map::new();
        for (key, raw) in pairs {
            let value = match self.get(&key).map(Schema::innermost) {
                Some(Schema::Number(_)) => coerce_number(&raw).unwrap_or(Value::String(raw)),
                Some(Schema::Boolean) => match raw.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => Value::String(raw),
                },
                _ => Value::String(raw),
            };
            map.insert(key, value);
        }
        Value::Object(map)
    }

    fn check(&self, obj: &Map<String, Value>, path: &mut Vec<PathSegment>, errors: &mut ValidationErrors) {
        for (name, schema) in &self.fields {
            path.push(PathSegment::Key(name.clone()));
            match obj.get(name) {
                Some(v) => schema.check(v, path, errors),
                None if matches!(schema, Schema::Optional(_)) => {}
                None => errors.push(Issue::new(path, IssueCode::Required, "Required")),
            }
            path.pop();
        }
    }
}

/// Integral values (`20`, `20.0`, `1e2`) become JSON integers when they fit in
/// `i64`/`u64`; anything else stays a float for the schema to judge.
fn coerce_number(raw: &str) -> Option<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Some(Value::Number(u.into()));
    }
    let f = raw.parse::<f64>().ok()?;
    if f.fract() == 0.0 {
        if (0.0..U64_BOUND).contains(&f) {
            return Some(Value::Number((f as u64).into()));
        }
        if f < 0.0 && f >= i64::MIN as f64 {
            return Some(Value::Number((f as i64).into()));
        }
    }
    Number::from_f64(f).map(Value::Number)
}

#[derive(Clone, Debug)]
pub enum Schema {
    String(StringSchema),
    Number(NumberSchema),
    Boolean,
    Array(Box<Schema>),
    Object(ObjectSchema),
    Nullable(Box<Schema>),
    /// Only meaningful as an object field: the key may be absent.
    Optional(Box<Schema>),
}

pub fn string() -> StringSchema {
    StringSchema::default()
}

pub fn number() -> NumberSchema {
    NumberSchema::default()
}

pub fn boolean() -> Schema {
    Schema::Boolean
}

pub fn object() -> ObjectSchema {
    ObjectSchema::default()
}

impl From<StringSchema> for Schema {
    fn from(s: StringSchema) -> Self {
        Schema::String(s)
    }
}

impl From<NumberSchema> for Schema {
    fn from(n: NumberSchema) -> Self {
        Schema::Number(n)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(o: ObjectSchema) -> Self {
        Schema::Object(o)
    }
}

/// Wrappers available on every schema builder.
pub trait SchemaExt: Into<Schema> + Sized {
    fn nullable(self) -> Schema {
        Schema::Nullable(Box::new(self.into()))
    }

    fn optional(self) -> Schema {
        Schema::Optional(Box::new(self.into()))
    }

    fn array(self) -> Schema {
        Schema::Array(Box::new(self.into()))
    }
}

impl<T: Into<Schema>> SchemaExt for T {}

impl Schema {
    /// Check `value`, collecting every violation.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut path = Vec::new();
        self.check(value, &mut path, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    /// Validate, then deserialize into the typed value.
    pub fn parse<T: DeserializeOwned>(&self, value: Value) -> Result<T, ValidationErrors> {
        self.validate(&value)?;
        serde_json::from_value(value)
            .map_err(|e| ValidationErrors::single(Issue::root(IssueCode::InvalidType, e.to_string())))
    }

    /// The object shape, if this schema (under any wrappers) is an object.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self.innermost() {
            Schema::Object(o) => Some(o),
            _ => None,
        }
    }

    fn innermost(&self) -> &Schema {
        let mut s = self;
        while let Schema::Nullable(inner) | Schema::Optional(inner) = s {
            s = &**inner;
        }
        s
    }

    fn check(&self, value: &Value, path: &mut Vec<PathSegment>, errors: &mut ValidationErrors) {
        match (self, value) {
            (Schema::Nullable(_), Value::Null) => {}
            (Schema::Nullable(inner) | Schema::Optional(inner), v) => inner.check(v, path, errors),
            (Schema::String(s), Value::String(v)) => s.check(v, path, errors),
            (Schema::Number(n), Value::Number(v)) => n.check(v, path, errors),
            (Schema::Boolean, Value::Bool(_)) => {}
            (Schema::Array(item), Value::Array(items)) => {
                for (i, v) in items.iter().enumerate() {
                    path.push(PathSegment::Index(i));
                    item.check(v, path, errors);
                    path.pop();
                }
            }
            (Schema::Object(o), Value::Object(map)) => o.check(map, path, errors),
            (expected, v) => errors.push(Issue::new(
                path,
                IssueCode::InvalidType,
                format!("Expected {}, received {}", expected.type_name(), value_type(v)),
            )),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Schema::String(_) => "string",
            Schema::Number(_) => "number",
            Schema::Boolean => "boolean",
            Schema::Array(_) => "array",
            Schema::Object(_) => "object",
            Schema::Nullable(inner) | Schema::Optional(inner) => inner.type_name(),
        }
    }
}

fn value_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
