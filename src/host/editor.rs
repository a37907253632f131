use serde_json::Value;

use crate::eval::evaluator::Evaluator;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{VideoGenError, VideoGenResult};
use crate::host::generate::{ArtifactRef, generate_validated};
use crate::params::ParameterSet;
use crate::params::schema::{FieldKind, FieldSpec};
use crate::render::pipeline::RenderThreading;
use crate::scene::node::RenderTree;
use crate::templates::TemplateParams;
use crate::templates::registry::{self, TemplateDescriptor};

/// Input widget an editor shows for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Color picker plus hex text box.
    Color,
    /// Numeric input.
    Number,
    /// Free text.
    Text,
}

/// One editable scalar field.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EditorField {
    /// Parameter key.
    pub key: String,
    /// Human label.
    pub label: String,
    /// Widget to show.
    pub widget: WidgetKind,
    /// Current value.
    pub value: Value,
}

/// Editing state for one template: the parameter set being edited.
///
/// Edits are applied as given; validation happens on preview and generate.
#[derive(Clone, Debug)]
pub struct EditorSession {
    template: &'static TemplateDescriptor,
    params: ParameterSet,
}

impl EditorSession {
    /// Start editing `template_id` from its defaults.
    pub fn open(template_id: &str) -> VideoGenResult<Self> {
        let template = registry::lookup(template_id)?;
        Ok(Self {
            template,
            params: template.default_parameter_set()?,
        })
    }

    /// Template being edited.
    pub fn template(&self) -> &'static TemplateDescriptor {
        self.template
    }

    /// Current parameters.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Scalar fields in schema order; list fields have no widget and are skipped.
    pub fn fields(&self) -> Vec<EditorField> {
        self.template
            .kind
            .schema()
            .fields
            .iter()
            .filter_map(|spec| {
                let value = self.params.get(spec.name)?;
                if !(value.is_string() || value.is_number() || value.is_boolean()) {
                    return None;
                }
                Some(EditorField {
                    key: spec.name.to_owned(),
                    label: field_label(spec.name),
                    widget: widget_for(spec.name, value),
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// Apply text typed into the widget for `key`.
    ///
    /// Number fields parse the text; everything else stores it verbatim.
    pub fn set(&mut self, key: &str, input: &str) -> VideoGenResult<()> {
        let spec = self.spec(key)?;
        let value = match spec.kind {
            FieldKind::Number => {
                let n = input
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| VideoGenError::validation(key, format!("'{input}' is not a number")))?;
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| VideoGenError::validation(key, "number is not representable"))?
            }
            FieldKind::String | FieldKind::Color => Value::String(input.to_owned()),
            FieldKind::StringList | FieldKind::RecordList(_) => {
                return Err(VideoGenError::validation(
                    key,
                    "list fields take a JSON value, not text",
                ));
            }
        };
        tracing::debug!(key, "field edited");
        self.params.insert(key.to_owned(), value);
        Ok(())
    }

    /// Replace `key` with a raw JSON value (lists included).
    pub fn set_value(&mut self, key: &str, value: Value) -> VideoGenResult<()> {
        self.spec(key)?;
        self.params.insert(key.to_owned(), value);
        Ok(())
    }

    /// Drop all edits.
    pub fn reset(&mut self) -> VideoGenResult<()> {
        self.params = self.template.default_parameter_set()?;
        Ok(())
    }

    /// Current parameters after schema validation.
    pub fn validated(&self) -> VideoGenResult<TemplateParams> {
        self.template.validate(&self.params)
    }

    /// Render tree for `frame` with the current parameters.
    pub fn preview(&self, frame: FrameIndex) -> VideoGenResult<RenderTree> {
        Evaluator::eval_frame(self.template, &self.validated()?, frame)
    }

    /// `"{w}x{h} @ {fps}fps"`.
    pub fn preview_caption(&self) -> String {
        format!("{} @ {}fps", self.template.resolution(), self.template.fps.0)
    }

    /// Simulated generation of the current parameters.
    pub fn generate(&self, threading: &RenderThreading) -> VideoGenResult<ArtifactRef> {
        generate_validated(self.template, &self.validated()?, threading)
    }

    fn spec(&self, key: &str) -> VideoGenResult<&'static FieldSpec> {
        self.template
            .kind
            .schema()
            .field(key)
            .ok_or_else(|| VideoGenError::validation(key, "unknown field"))
    }
}

/// `"primaryColor"` becomes `"primary color"`.
pub fn field_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

fn widget_for(key: &str, value: &Value) -> WidgetKind {
    if key.contains("Color") {
        WidgetKind::Color
    } else if value.is_number() {
        WidgetKind::Number
    } else {
        WidgetKind::Text
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/editor.rs"]
mod tests;
