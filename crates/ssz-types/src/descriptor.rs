use serde::Deserialize;

use crate::error::SchemaError;
use crate::schema::{Kind, Schema};

/// Kind tag as written in a descriptor: either the numeric code or the
/// lowercase name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KindTag {
  Code(i64),
  Name(String),
}

impl KindTag {
  fn resolve(&self, path: &str) -> Result<Kind, SchemaError> {
    let kind = match self {
      KindTag::Code(code) => u64::try_from(*code).ok().and_then(Kind::from_code),
      KindTag::Name(name) => Kind::from_name(name),
    };
    kind.ok_or_else(|| SchemaError::UnknownKind {
      path: path.to_string(),
      tag: match self {
        KindTag::Code(code) => code.to_string(),
        KindTag::Name(name) => format!("{name:?}"),
      },
    })
  }
}

/// Serialized form of a [`Schema`], as found in schema files.
///
/// ```json
/// { "kind": "container",
///   "field_types": [ { "kind": "basic", "fixed_size": 8 },
///                    { "kind": 2, "element_type": { "kind": 0, "fixed_size": 8 } } ] }
/// ```
///
/// Sizes are read as signed integers so a negative value can be
/// reported as such rather than as a generic type mismatch. Unknown
/// keys are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct SchemaDescriptor {
  pub kind: KindTag,
  #[serde(default, alias = "fixedSize")]
  pub fixed_size: Option<i64>,
  #[serde(default, alias = "elementType")]
  pub element_type: Option<Box<SchemaDescriptor>>,
  #[serde(default, alias = "fieldTypes")]
  pub field_types: Option<Vec<SchemaDescriptor>>,
  #[serde(default, alias = "maxLength", alias = "limit")]
  pub max_length: Option<i64>,
}

impl SchemaDescriptor {
  /// Parse a descriptor from JSON text without validating it.
  ///
  /// # Errors
  ///
  /// Returns [`SchemaError::Json`] if `text` is not a descriptor object.
  pub fn from_json(text: &str) -> Result<Self, SchemaError> {
    Ok(serde_json::from_str(text)?)
  }

  /// Validate the descriptor tree and build the [`Schema`] it describes.
  ///
  /// # Errors
  ///
  /// Returns the first [`SchemaError`] found in a depth-first walk.
  pub fn to_schema(&self) -> Result<Schema, SchemaError> {
    self.build("$")
  }

  fn build(&self, path: &str) -> Result<Schema, SchemaError> {
    let kind = self.kind.resolve(path)?;
    let max_length = non_negative(self.max_length, path, "max_length")?;

    match kind {
      Kind::Basic => {
        let fixed_size = non_negative(self.fixed_size, path, "fixed_size")?
          .map(|n| usize::try_from(n).unwrap_or(usize::MAX));
        Ok(Schema::Basic { fixed_size })
      }
      Kind::Vector | Kind::List => {
        let element = self
          .element_type
          .as_deref()
          .ok_or_else(|| SchemaError::MissingElementType {
            path: path.to_string(),
            kind: kind.name(),
          })?
          .build(&format!("{path}.element_type"))?;
        Ok(if kind == Kind::Vector {
          Schema::vector(element)
        } else {
          Schema::List {
            element: Box::new(element),
            max_length,
          }
        })
      }
      Kind::Container => {
        let fields = self
          .field_types
          .iter()
          .flatten()
          .enumerate()
          .map(|(i, field)| field.build(&format!("{path}.field_types[{i}]")))
          .collect::<Result<Vec<_>, _>>()?;
        Ok(Schema::container(fields))
      }
      Kind::Bitlist => Ok(Schema::Bitlist { max_length }),
    }
  }
}

fn non_negative(
  value: Option<i64>,
  path: &str,
  field: &'static str,
) -> Result<Option<u64>, SchemaError> {
  value
    .map(|v| {
      u64::try_from(v).map_err(|_| SchemaError::NegativeSize {
        path: path.to_string(),
        field,
        value: v,
      })
    })
    .transpose()
}

impl Schema {
  /// Load a schema from its JSON descriptor.
  ///
  /// # Errors
  ///
  /// Returns a [`SchemaError`] if the text is not valid JSON or the
  /// descriptor names an unknown kind, omits a required element type,
  /// or carries a negative size.
  pub fn from_json(text: &str) -> Result<Self, SchemaError> {
    SchemaDescriptor::from_json(text)?.to_schema()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_basic_by_name_and_code() {
    let a = Schema::from_json(r#"{"kind": "basic", "fixed_size": 8}"#).unwrap();
    let b = Schema::from_json(r#"{"kind": 0, "fixed_size": 8}"#).unwrap();
    assert_eq!(a, Schema::basic(8));
    assert_eq!(a, b);
  }

  #[test]
  fn load_nested_container() {
    let text = r#"{
      "kind": "container",
      "field_types": [
        { "kind": "basic", "fixed_size": 8 },
        { "kind": 2, "element_type": { "kind": "basic", "fixed_size": 8 }, "max_length": 1024 }
      ]
    }"#;
    let schema = Schema::from_json(text).unwrap();
    assert_eq!(
      schema,
      Schema::container(vec![
        Schema::basic(8),
        Schema::list_with_limit(Schema::basic(8), 1024),
      ])
    );
  }

  #[test]
  fn camel_case_aliases() {
    let text = r#"{"kind": "list", "elementType": {"kind": "basic", "fixedSize": 4}, "maxLength": 16}"#;
    assert_eq!(
      Schema::from_json(text).unwrap(),
      Schema::list_with_limit(Schema::basic(4), 16)
    );
  }

  #[test]
  fn basic_without_size_loads_incomplete() {
    let schema = Schema::from_json(r#"{"kind": "basic"}"#).unwrap();
    assert_eq!(schema, Schema::Basic { fixed_size: None });
  }

  #[test]
  fn container_without_fields_is_empty() {
    let schema = Schema::from_json(r#"{"kind": 3}"#).unwrap();
    assert_eq!(schema, Schema::container(vec![]));
  }

  #[test]
  fn bitlist_with_limit() {
    let schema = Schema::from_json(r#"{"kind": "bitlist", "max_length": 2048}"#).unwrap();
    assert_eq!(schema.max_length(), Some(2048));
  }

  #[test]
  fn reject_unknown_kind_code() {
    let err = Schema::from_json(r#"{"kind": 7}"#).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownKind { ref tag, .. } if tag == "7"));
  }

  #[test]
  fn reject_unknown_kind_name() {
    let err = Schema::from_json(r#"{"kind": "union"}"#).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownKind { .. }));
  }

  #[test]
  fn reject_list_without_element() {
    let err = Schema::from_json(r#"{"kind": "list"}"#).unwrap_err();
    assert!(matches!(
      err,
      SchemaError::MissingElementType { kind: "list", .. }
    ));
  }

  #[test]
  fn reject_negative_size_reports_path() {
    let text = r#"{"kind": "container", "field_types": [{"kind": 0, "fixed_size": 4}, {"kind": 0, "fixed_size": -1}]}"#;
    match Schema::from_json(text).unwrap_err() {
      SchemaError::NegativeSize { path, field, value } => {
        assert_eq!(path, "$.field_types[1]");
        assert_eq!(field, "fixed_size");
        assert_eq!(value, -1);
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn reject_bad_json() {
    assert!(matches!(
      Schema::from_json("{kind: 0"),
      Err(SchemaError::Json(_))
    ));
  }
}
