//! Contact, tag and field types plus the shape checks applied to raw input.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ValidationError;

// =============================================================================
// TAGS
// =============================================================================

/// A labeled category from the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

impl Tag {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The catalog every fresh directory is seeded with.
    pub fn seeded_catalog() -> Vec<Tag> {
        vec![
            Tag::new(1, "tag1"),
            Tag::new(2, "tag2"),
            Tag::new(3, "tag3"),
        ]
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// A free-form `{slug, value}` pair attached to a contact.
///
/// `value` is echoed back verbatim, whatever JSON type the caller sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub slug: String,
    pub value: JsonValue,
}

impl Field {
    pub fn new(slug: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            slug: slug.into(),
            value: value.into(),
        }
    }
}

/// Validate a raw `fields` payload.
///
/// `null` means "no fields". Anything else must be an array of objects that
/// each carry a string `slug` and a `value`. Extra keys are ignored.
pub fn parse_fields(raw: &JsonValue) -> Result<Vec<Field>, ValidationError> {
    let items = match raw {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) => items,
        _ => return Err(ValidationError::FieldsNotSequence),
    };

    let mut fields = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let map = item
            .as_object()
            .ok_or(ValidationError::FieldNotObject { index })?;
        let (Some(slug), Some(value)) = (map.get("slug"), map.get("value")) else {
            return Err(ValidationError::FieldMissingKeys { index });
        };
        let slug = slug
            .as_str()
            .ok_or(ValidationError::FieldSlugNotString { index })?;
        fields.push(Field::new(slug, value.clone()));
    }
    Ok(fields)
}

/// A truthy `tagId` as the caller sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRef {
    /// A value equal to a positive integer: `2`, `2.0`, or `true` (which
    /// equals 1).
    Id(u64),
    /// Any other truthy value (`"1"`, `1.5`, `-2`, objects). It can never
    /// name a catalog tag. Holds the raw JSON text.
    Unmatched(String),
}

impl TagRef {
    pub fn id(&self) -> Option<u64> {
        match self {
            TagRef::Id(id) => Some(*id),
            TagRef::Unmatched(_) => None,
        }
    }
}

impl From<u64> for TagRef {
    fn from(id: u64) -> Self {
        TagRef::Id(id)
    }
}

impl std::fmt::Display for TagRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagRef::Id(id) => write!(f, "{}", id),
            TagRef::Unmatched(raw) => f.write_str(raw),
        }
    }
}

/// Interpret a raw `tagId` value.
///
/// Absent and falsy values (`null`, `false`, `0`, `""`, empty containers)
/// count as missing. Every other value is accepted; values that equal no
/// positive integer become [`TagRef::Unmatched`] and fail the catalog lookup.
pub fn parse_tag_id(raw: Option<&JsonValue>) -> Result<TagRef, ValidationError> {
    let Some(raw) = raw else {
        return Err(ValidationError::TagIdMissing);
    };
    if is_falsy(raw) {
        return Err(ValidationError::TagIdMissing);
    }
    let id = match raw {
        JsonValue::Bool(true) => Some(1),
        JsonValue::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    };
    Ok(match id {
        Some(id) => TagRef::Id(id),
        None => TagRef::Unmatched(raw.to_string()),
    })
}

fn is_falsy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(a) => a.is_empty(),
        JsonValue::Object(o) => o.is_empty(),
    }
}

// =============================================================================
// CONTACTS
// =============================================================================

/// A directory record identified by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub email: String,
    pub tags: Vec<Tag>,
    pub fields: Vec<Field>,
}

impl Contact {
    pub fn has_tag(&self, tag_id: u64) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Look up a field value by slug.
    pub fn field(&self, slug: &str) -> Option<&JsonValue> {
        self.fields.iter().find(|f| f.slug == slug).map(|f| &f.value)
    }

    /// Overwrite the value of an existing slug in place, or append a new field.
    pub fn upsert_field(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.slug == field.slug) {
            Some(existing) => existing.value = field.value,
            None => self.fields.push(field),
        }
    }
}

/// Body of a create request, before validation.
///
/// Both members are kept raw so the directory can report exactly which shape
/// check failed, in the order the checks are defined.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub email: Option<JsonValue>,
    #[serde(default)]
    pub fields: Option<JsonValue>,
}

impl NewContact {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(JsonValue::String(email.into())),
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = Some(serde_json::json!(fields));
        self
    }

    /// The non-empty string email, if one was supplied.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_ref()
            .and_then(JsonValue::as_str)
            .filter(|e| !e.is_empty())
    }
}

/// Body of a merge-patch request. Absent members leave the contact unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fields: Option<JsonValue>,
}

impl ContactPatch {
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            fields: None,
        }
    }

    pub fn fields(fields: Vec<Field>) -> Self {
        Self {
            email: None,
            fields: Some(serde_json::json!(fields)),
        }
    }
}
