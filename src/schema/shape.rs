//! Shape, field and type definitions plus the schema directive rendering.

use serde_json::{Map, Value, json};

/// The type of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    /// Whole numbers only; `3.0` is rejected.
    Integer,
    Number,
    Boolean,
    /// Ordered sequence of items of one type.
    Array(Box<FieldType>),
    /// Nested record.
    Object(Shape),
}

impl FieldType {
    /// Array of `item`.
    pub fn array_of(item: FieldType) -> Self {
        FieldType::Array(Box::new(item))
    }

    /// Name used in violation messages and the schema directive.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array(_) => "array",
            FieldType::Object(_) => "object",
        }
    }

    /// Whether values of this type can be substituted into a template.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldType::Array(_) | FieldType::Object(_))
    }

    pub(crate) fn to_json_schema(&self) -> Value {
        match self {
            FieldType::Array(item) => json!({
                "type": "array",
                "items": item.to_json_schema(),
            }),
            FieldType::Object(shape) => shape.to_json_schema(),
            scalar => json!({ "type": scalar.type_name() }),
        }
    }
}

/// A named field within a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Applied when the field is omitted or null.
    pub default: Option<Value>,
    /// Rejects empty or whitespace-only strings.
    pub non_empty: bool,
    pub description: Option<String>,
}

impl FieldSpec {
    /// A field that must be present.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
            non_empty: false,
            description: None,
        }
    }

    /// A field that may be omitted.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Set the value used when the field is omitted.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Reject empty or whitespace-only strings.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Describe the field for the backend.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An ordered set of named fields describing a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    fields: Vec<FieldSpec>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. A later field with the same name replaces the earlier one.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.retain(|f| f.name != spec.name);
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the shape as a JSON-schema-like object directive.
    ///
    /// Uses the OpenAPI subset the generative backends accept: `type`,
    /// `properties`, `required`, `items`, `description`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut schema = field.field_type.to_json_schema();
            if let (Some(description), Some(obj)) = (&field.description, schema.as_object_mut()) {
                obj.insert("description".to_string(), json!(description));
            }
            properties.insert(field.name.clone(), schema);
            if field.required {
                required.push(json!(field.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
