// crates/products-contract/src/shape.rs
// ============================================================================
// Module: Shape Descriptors
// Description: Composable structural descriptors for JSON payloads.
// Purpose: Validate loose JSON against declared shapes with precise diagnostics.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Shape`] is a tagged descriptor per JSON kind. Objects are described by
//! an [`ObjectShape`], an ordered list of named fields that may be required or
//! optional. Validation is structural: unknown fields are tolerated, missing
//! required fields and wrong primitive kinds are reported, and nothing is
//! coerced (a numeric-looking string in a numeric field is a violation).
//!
//! Every violation carries the JSON path of the offending value together with
//! the expected and actual kinds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field name of the entity identifier that survives projection.
pub const IDENTIFIER_FIELD: &str = "id";

// ============================================================================
// SECTION: Shape Descriptors
// ============================================================================

/// Structural descriptor for a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// JSON string.
    String,
    /// JSON number (integral or fractional), with an optional lower bound.
    Number {
        /// Inclusive minimum.
        minimum: Option<f64>,
    },
    /// JSON number with no fractional part, with an optional lower bound.
    Integer {
        /// Inclusive minimum.
        minimum: Option<i64>,
    },
    /// JSON boolean.
    Boolean,
    /// JSON array whose every element matches the inner shape.
    Array(Box<Shape>),
    /// JSON object described field by field.
    Object(ObjectShape),
}

impl Shape {
    /// Unbounded number.
    #[must_use]
    pub const fn number() -> Self {
        Self::Number {
            minimum: None,
        }
    }

    /// Number that must be `>= 0`.
    #[must_use]
    pub const fn non_negative_number() -> Self {
        Self::Number {
            minimum: Some(0.0),
        }
    }

    /// Unbounded integer.
    #[must_use]
    pub const fn integer() -> Self {
        Self::Integer {
            minimum: None,
        }
    }

    /// Integer that must be `>= minimum`.
    #[must_use]
    pub const fn integer_at_least(minimum: i64) -> Self {
        Self::Integer {
            minimum: Some(minimum),
        }
    }

    /// Array of `item`.
    #[must_use]
    pub fn array_of(item: Self) -> Self {
        Self::Array(Box::new(item))
    }

    /// Returns the kind label of this shape.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::String => ShapeKind::String,
            Self::Number {
                ..
            } => ShapeKind::Number,
            Self::Integer {
                ..
            } => ShapeKind::Integer,
            Self::Boolean => ShapeKind::Boolean,
            Self::Array(_) => ShapeKind::Array,
            Self::Object(_) => ShapeKind::Object,
        }
    }

    /// Returns the object descriptor when this shape is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectShape> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Validates `value`, stopping at the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`ShapeViolation`] in document order.
    pub fn validate(&self, value: &Value) -> Result<(), ShapeViolation> {
        let mut walker = Walker::new(true);
        walker.visit(self, value);
        walker.violations.into_iter().next().map_or(Ok(()), Err)
    }

    /// Validates `value` and returns every violation in document order.
    #[must_use]
    pub fn violations(&self, value: &Value) -> Vec<ShapeViolation> {
        let mut walker = Walker::new(false);
        walker.visit(self, value);
        walker.violations
    }

    /// Renders this shape as a draft 2020-12 JSON Schema fragment.
    ///
    /// Objects are rendered open (`additionalProperties` is not restricted),
    /// matching the structural validation rules.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Number {
                minimum,
            } => {
                let mut schema = json!({ "type": "number" });
                if let (Some(min), Some(obj)) = (minimum, schema.as_object_mut()) {
                    obj.insert("minimum".to_string(), json!(min));
                }
                schema
            }
            Self::Integer {
                minimum,
            } => {
                let mut schema = json!({ "type": "integer" });
                if let (Some(min), Some(obj)) = (minimum, schema.as_object_mut()) {
                    obj.insert("minimum".to_string(), json!(min));
                }
                schema
            }
            Self::Array(item) => json!({ "type": "array", "items": item.to_json_schema() }),
            Self::Object(object) => object.to_json_schema(),
        }
    }
}

impl From<ObjectShape> for Shape {
    fn from(object: ObjectShape) -> Self {
        Self::Object(object)
    }
}

/// A named field of an [`ObjectShape`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    /// Wire name of the field.
    pub name: String,
    /// Shape of the field value.
    pub shape: Shape,
    /// Whether the field must be present.
    pub required: bool,
}

/// Ordered, named object descriptor.
///
/// # Invariants
/// - Field names are unique; adding a field with an existing name replaces it
///   in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectShape {
    /// Descriptor name used in diagnostics and schema titles.
    name: String,
    /// Fields in declaration order.
    fields: Vec<FieldShape>,
}

impl ObjectShape {
    /// Creates an empty object descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a required field.
    #[must_use]
    pub fn field(self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.with_field(FieldShape {
            name: name.into(),
            shape: shape.into(),
            required: true,
        })
    }

    /// Adds an optional field.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.with_field(FieldShape {
            name: name.into(),
            shape: shape.into(),
            required: false,
        })
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldShape) -> Self {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
        self
    }

    /// Appends every field of `other`, replacing same-named fields.
    #[must_use]
    pub fn extend(self, other: Self) -> Self {
        other.fields.into_iter().fold(self, Self::with_field)
    }

    /// Returns a copy with a different descriptor name.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restricts the descriptor to the identifier plus `selected` fields.
    ///
    /// Every kept field becomes required. Selected names unknown to this
    /// descriptor are ignored because their shape cannot be inferred.
    #[must_use]
    pub fn project(&self, selected: &[&str]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|f| f.name == IDENTIFIER_FIELD || selected.contains(&f.name.as_str()))
            .map(|f| FieldShape {
                required: true,
                ..f.clone()
            })
            .collect();
        Self {
            name: format!("{}Projection", self.name),
            fields,
        }
    }

    /// Makes every field except the identifier optional.
    #[must_use]
    pub fn partial(&self) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|f| FieldShape {
                required: f.name == IDENTIFIER_FIELD,
                ..f.clone()
            })
            .collect();
        Self {
            name: format!("Partial{}", self.name),
            fields,
        }
    }

    /// Returns the descriptor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the names of the required fields.
    #[must_use]
    pub fn required_names(&self) -> Vec<&str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name.as_str()).collect()
    }

    /// Renders this descriptor as an open JSON Schema object.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), field.shape.to_json_schema());
        }
        json!({
            "type": "object",
            "title": self.name,
            "required": self.required_names(),
            "properties": properties,
        })
    }
}

// ============================================================================
// SECTION: Kinds
// ============================================================================

/// Kind expected by a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// String.
    String,
    /// Number.
    Number,
    /// Integer.
    Integer,
    /// Boolean.
    Boolean,
    /// Array.
    Array,
    /// Object.
    Object,
}

impl ShapeKind {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an actual JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// Boolean.
    Boolean,
    /// Number with no fractional part.
    Integer,
    /// Number with a fractional part.
    Number,
    /// String.
    String,
    /// Array.
    Array,
    /// Object.
    Object,
}

impl ValueKind {
    /// Classifies a JSON value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if is_integral(n) => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member.
    Field(String),
    /// Array element.
    Index(usize),
}

/// Location of a value inside a document, rendered as `a.b[2].c`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// Returns the segments from the document root.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns true for the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (idx, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if idx == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

/// Reason a value failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Required field absent.
    Missing {
        /// Kind the field should have had.
        expected: ShapeKind,
    },
    /// Value present with the wrong kind.
    TypeMismatch {
        /// Declared kind.
        expected: ShapeKind,
        /// Observed kind.
        actual: ValueKind,
    },
    /// Numeric value below the declared minimum.
    BelowMinimum {
        /// Declared kind.
        expected: ShapeKind,
        /// Inclusive minimum.
        minimum: f64,
        /// Observed value.
        actual: f64,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing {
                expected,
            } => write!(f, "expected {expected}, found missing field"),
            Self::TypeMismatch {
                expected,
                actual,
            } => write!(f, "expected {expected}, found {actual}"),
            Self::BelowMinimum {
                expected,
                minimum,
                actual,
            } => write!(f, "expected {expected} >= {minimum}, found {actual}"),
        }
    }
}

/// A structural violation at a specific path.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {kind}")]
pub struct ShapeViolation {
    /// Location of the offending value.
    pub path: JsonPath,
    /// What was wrong with it.
    pub kind: ViolationKind,
}

// ============================================================================
// SECTION: Validation Walker
// ============================================================================

/// Depth-first validator that tracks the current path.
struct Walker {
    /// Stop after the first violation.
    first_only: bool,
    /// Current path from the root.
    path: Vec<PathSegment>,
    /// Violations collected so far.
    violations: Vec<ShapeViolation>,
}

impl Walker {
    /// Creates a walker.
    const fn new(first_only: bool) -> Self {
        Self {
            first_only,
            path: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Returns true when no further work is needed.
    fn done(&self) -> bool {
        self.first_only && !self.violations.is_empty()
    }

    /// Records a violation at the current path.
    fn report(&mut self, kind: ViolationKind) {
        self.violations.push(ShapeViolation {
            path: JsonPath(self.path.clone()),
            kind,
        });
    }

    /// Validates `value` against `shape` at the current path.
    fn visit(&mut self, shape: &Shape, value: &Value) {
        match (shape, value) {
            (Shape::String, Value::String(_)) | (Shape::Boolean, Value::Bool(_)) => {}
            (
                Shape::Number {
                    minimum,
                },
                Value::Number(n),
            ) => {
                let actual = n.as_f64().unwrap_or(f64::NAN);
                if let Some(min) = minimum
                    && actual < *min
                {
                    self.report(ViolationKind::BelowMinimum {
                        expected: ShapeKind::Number,
                        minimum: *min,
                        actual,
                    });
                }
            }
            (
                Shape::Integer {
                    minimum,
                },
                Value::Number(n),
            ) => {
                if !is_integral(n) {
                    self.report(ViolationKind::TypeMismatch {
                        expected: ShapeKind::Integer,
                        actual: ValueKind::Number,
                    });
                    return;
                }
                if let Some(min) = minimum
                    && below_integer_minimum(n, *min)
                {
                    self.report(ViolationKind::BelowMinimum {
                        expected: ShapeKind::Integer,
                        minimum: integer_as_f64(*min),
                        actual: n.as_f64().unwrap_or(f64::NAN),
                    });
                }
            }
            (Shape::Array(item), Value::Array(items)) => {
                for (idx, element) in items.iter().enumerate() {
                    if self.done() {
                        return;
                    }
                    self.path.push(PathSegment::Index(idx));
                    self.visit(item, element);
                    self.path.pop();
                }
            }
            (Shape::Object(object), Value::Object(map)) => {
                for field in object.fields() {
                    if self.done() {
                        return;
                    }
                    self.path.push(PathSegment::Field(field.name.clone()));
                    match map.get(&field.name) {
                        Some(member) => self.visit(&field.shape, member),
                        None if field.required => self.report(ViolationKind::Missing {
                            expected: field.shape.kind(),
                        }),
                        None => {}
                    }
                    self.path.pop();
                }
            }
            (expected, actual) => self.report(ViolationKind::TypeMismatch {
                expected: expected.kind(),
                actual: ValueKind::of(actual),
            }),
        }
    }
}

/// Returns true when a JSON number has no fractional part.
fn is_integral(n: &Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

/// Returns true when an integral JSON number is below `min`.
fn below_integer_minimum(n: &Number, min: i64) -> bool {
    if let Some(value) = n.as_i64() {
        return value < min;
    }
    if n.is_u64() {
        return false;
    }
    n.as_f64().is_some_and(|f| f < integer_as_f64(min))
}

/// Widens an integer bound for diagnostics.
#[allow(clippy::cast_precision_loss, reason = "Bounds are small literals in practice.")]
const fn integer_as_f64(value: i64) -> f64 {
    value as f64
}

// ============================================================================
// SECTION: Tests
// ============================================================================
