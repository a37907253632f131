pub(crate) mod color;
pub(crate) mod schema;

/// User-editable parameters of one template: field name to JSON value.
pub type ParameterSet = serde_json::Map<String, serde_json::Value>;
