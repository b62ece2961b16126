/// Errors raised while loading a schema from an external description.
///
/// All of these surface as `UnsupportedType` once they reach the
/// decoder's error taxonomy. The `path` field names the offending node
/// in JSON-pointer-ish form (`$.field_types[1].element_type`).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
  /// The descriptor text is not valid JSON or does not match the
  /// expected object shape.
  #[error("schema JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// The `kind` field is neither a known code (0-4) nor a known name.
  #[error("unknown schema kind {tag} at {path}")]
  UnknownKind { path: String, tag: String },

  /// A `Vector` or `List` node has no `element_type`.
  #[error("{kind} schema at {path} has no element_type")]
  MissingElementType { path: String, kind: &'static str },

  /// A size or length field is negative.
  #[error("negative {field} {value} at {path}")]
  NegativeSize {
    path: String,
    field: &'static str,
    value: i64,
  },
}
