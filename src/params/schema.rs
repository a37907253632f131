use crate::foundation::error::VideoGenError;
use crate::params::ParameterSet;
use crate::params::color::parse_hex;
use serde_json::Value;
use std::fmt;

/// Declared type of one template parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    String,
    /// Any JSON number.
    Number,
    /// Hex color string.
    Color,
    /// List of strings.
    StringList,
    /// List of records, each checked against the nested fields.
    RecordList(&'static [FieldSpec]),
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            Self::String => "expected string",
            Self::Number => "expected number",
            Self::Color => "expected color string",
            Self::StringList => "expected array of strings",
            Self::RecordList(_) => "expected array of objects",
        }
    }
}

/// One named parameter of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Parameter key as it appears in the parameter set.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
    /// Whether the key may be absent (or `null`).
    pub optional: bool,
}

impl FieldSpec {
    /// Required field.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
        }
    }

    /// Optional field.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: true,
        }
    }
}

/// Declared shape of a template's parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    /// Fields in display order.
    pub fields: &'static [FieldSpec],
}

/// Step in the path to a failing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Object key.
    Field(String),
    /// Array index.
    Index(usize),
}

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Location of the failing value.
    pub path: Vec<SchemaPathElem>,
    /// What was wrong.
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Dotted path such as `dataPoints[1].value`.
    pub fn field_path(&self) -> String {
        let mut s = String::new();
        for p in &self.path {
            match p {
                SchemaPathElem::Field(name) => {
                    if !s.is_empty() {
                        s.push('.');
                    }
                    s.push_str(name);
                }
                SchemaPathElem::Index(i) => {
                    s.push('[');
                    s.push_str(&i.to_string());
                    s.push(']');
                }
            }
        }
        s
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", self.field_path(), self.message)
    }
}

/// Every violation found in one parameter set, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaErrors {
    /// Individual violations.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for VideoGenError {
    fn from(errs: SchemaErrors) -> Self {
        match errs.errors.first() {
            Some(first) => VideoGenError::validation(first.field_path(), first.message.clone()),
            None => VideoGenError::validation("", "invalid parameters"),
        }
    }
}

impl Schema {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check `params` against this schema, collecting every violation.
    pub fn check(&self, params: &ParameterSet) -> Result<(), SchemaErrors> {
        let mut errors = Vec::new();
        check_record(self.fields, params, &mut Vec::new(), &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaErrors { errors })
        }
    }
}

fn check_record(
    fields: &[FieldSpec],
    record: &serde_json::Map<String, Value>,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    for spec in fields {
        path.push(SchemaPathElem::Field(spec.name.to_owned()));
        match record.get(spec.name) {
            None | Some(Value::Null) if spec.optional => {}
            None => errors.push(SchemaError::at(path, "required field is missing")),
            Some(value) => check_value(spec.kind, value, path, errors),
        }
        path.pop();
    }

    for key in record.keys() {
        if !fields.iter().any(|f| f.name == key) {
            path.push(SchemaPathElem::Field(key.clone()));
            errors.push(SchemaError::at(path, "unknown field"));
            path.pop();
        }
    }
}

fn check_value(
    kind: FieldKind,
    value: &Value,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    match (kind, value) {
        (FieldKind::String, Value::String(_)) => {}
        (FieldKind::Number, Value::Number(n)) if n.as_f64().is_some_and(f64::is_finite) => {}
        (FieldKind::Color, Value::String(s)) => {
            if let Err(msg) = parse_hex(s) {
                errors.push(SchemaError::at(path, msg));
            }
        }
        (FieldKind::StringList, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                path.push(SchemaPathElem::Index(i));
                check_value(FieldKind::String, item, path, errors);
                path.pop();
            }
        }
        (FieldKind::RecordList(fields), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                path.push(SchemaPathElem::Index(i));
                match item {
                    Value::Object(record) => check_record(fields, record, path, errors),
                    _ => errors.push(SchemaError::at(path, "expected object")),
                }
                path.pop();
            }
        }
        (kind, _) => errors.push(SchemaError::at(path, kind.expected())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/schema.rs"]
mod tests;
