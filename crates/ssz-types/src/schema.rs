use std::fmt;

/// Schema kind tag.
///
/// The numeric codes are the ones used by external schema files and
/// are stable across releases.
///
/// ```text
/// ┌───────────┬──────┬──────────────────────────────────────────┐
/// │ Kind      │ Code │ Payload                                  │
/// ├───────────┼──────┼──────────────────────────────────────────┤
/// │ Basic     │ 0    │ fixed_size (0 = variable opaque bytes)   │
/// │ Vector    │ 1    │ element schema                           │
/// │ List      │ 2    │ element schema, optional max_length      │
/// │ Container │ 3    │ ordered field schemas                    │
/// │ Bitlist   │ 4    │ optional max_length                      │
/// └───────────┴──────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
  Basic = 0,
  Vector = 1,
  List = 2,
  Container = 3,
  Bitlist = 4,
}

impl Kind {
  /// Every kind, in code order.
  pub const ALL: [Kind; 5] = [
    Kind::Basic,
    Kind::Vector,
    Kind::List,
    Kind::Container,
    Kind::Bitlist,
  ];

  /// Map a numeric code to a kind. Unknown codes yield `None`.
  #[must_use]
  pub fn from_code(code: u64) -> Option<Self> {
    Self::ALL.into_iter().find(|k| u64::from(k.code()) == code)
  }

  /// Map a lowercase name (`"basic"`, `"list"`, ...) to a kind.
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name))
  }

  #[must_use]
  pub fn code(self) -> u8 {
    self as u8
  }

  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      Kind::Basic => "basic",
      Kind::Vector => "vector",
      Kind::List => "list",
      Kind::Container => "container",
      Kind::Bitlist => "bitlist",
    }
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Shape of a value to decode.
///
/// One variant per [`Kind`], each carrying exactly the data its decode
/// algorithm needs. Schemas are immutable once built and are borrowed by
/// the parser for the duration of a call.
///
/// Nested element and field schemas only contribute their declared
/// size to the parent layout: a positive `fixed_size` makes them fixed,
/// anything else makes them variable. They are not decoded recursively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Schema {
  /// Opaque bytes. `Some(0)` is variable length, `Some(n)` is exactly
  /// `n` bytes, `None` is an incomplete schema the parser rejects.
  Basic { fixed_size: Option<usize> },

  /// Homogeneous sequence without a length mixin.
  Vector { element: Box<Schema> },

  /// Homogeneous sequence whose element count is mixed into the root.
  /// `max_length` is advisory and not enforced by the parser.
  List {
    element: Box<Schema>,
    max_length: Option<u64>,
  },

  /// Heterogeneous record; field order is significant.
  Container { fields: Vec<Schema> },

  /// Sentinel-terminated bit sequence whose bit length is mixed into
  /// the root. `max_length` is advisory.
  Bitlist { max_length: Option<u64> },
}

impl Schema {
  /// Fixed-size opaque value of `size` bytes (`0` = variable length).
  #[must_use]
  pub fn basic(size: usize) -> Self {
    Schema::Basic {
      fixed_size: Some(size),
    }
  }

  /// Variable-length opaque bytes.
  #[must_use]
  pub fn bytes() -> Self {
    Self::basic(0)
  }

  #[must_use]
  pub fn vector(element: Schema) -> Self {
    Schema::Vector {
      element: Box::new(element),
    }
  }

  #[must_use]
  pub fn list(element: Schema) -> Self {
    Schema::List {
      element: Box::new(element),
      max_length: None,
    }
  }

  #[must_use]
  pub fn list_with_limit(element: Schema, max_length: u64) -> Self {
    Schema::List {
      element: Box::new(element),
      max_length: Some(max_length),
    }
  }

  #[must_use]
  pub fn container(fields: Vec<Schema>) -> Self {
    Schema::Container { fields }
  }

  #[must_use]
  pub fn bitlist() -> Self {
    Schema::Bitlist { max_length: None }
  }

  #[must_use]
  pub fn kind(&self) -> Kind {
    match self {
      Schema::Basic { .. } => Kind::Basic,
      Schema::Vector { .. } => Kind::Vector,
      Schema::List { .. } => Kind::List,
      Schema::Container { .. } => Kind::Container,
      Schema::Bitlist { .. } => Kind::Bitlist,
    }
  }

  /// Declared positive byte width, if this schema is fixed-size.
  ///
  /// Only a `Basic` with `fixed_size > 0` is fixed-size. Every other
  /// schema occupies an offset slot when nested in a container.
  #[must_use]
  pub fn fixed_size(&self) -> Option<usize> {
    match self {
      Schema::Basic {
        fixed_size: Some(n),
      } if *n > 0 => Some(*n),
      _ => None,
    }
  }

  #[must_use]
  pub fn is_fixed_size(&self) -> bool {
    self.fixed_size().is_some()
  }

  #[must_use]
  pub fn max_length(&self) -> Option<u64> {
    match self {
      Schema::List { max_length, .. } | Schema::Bitlist { max_length } => *max_length,
      _ => None,
    }
  }

  /// Total encoded width when the layout does not depend on the bytes.
  ///
  /// `Some` for a fixed-size `Basic` and for a non-empty container whose
  /// fields are all fixed-size. The streaming reader path relies on this
  /// to lay out ranges before any byte has been read.
  #[must_use]
  pub fn static_size(&self) -> Option<usize> {
    match self {
      Schema::Basic { .. } => self.fixed_size(),
      Schema::Container { fields } if !fields.is_empty() => fields
        .iter()
        .try_fold(0usize, |acc, f| acc.checked_add(f.fixed_size()?)),
      _ => None,
    }
  }
}
