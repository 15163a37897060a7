use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::{convert::Infallible, fmt, str::FromStr};
use utoipa::ToSchema;

use crate::config::FieldSelector;

/// Search term attached either to the whole grid or to a single column.
///
/// Grid clients send `regex` alongside every search value. It is accepted so
/// that requests deserialize, but searches are always substring matches.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct SearchValue {
    #[serde(default)]
    pub value: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub regex: bool,
}

impl SearchValue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            regex: false,
        }
    }

    /// The search text with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// Metadata for one visible grid column.
///
/// Both the `data` and `name` attributes are always present on the struct;
/// [`FieldSelector`] decides which one names the column in the data domain.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ColumnDescriptor {
    #[serde(default, deserialize_with = "deserialize_field_name")]
    pub data: Option<String>,
    #[serde(default, deserialize_with = "deserialize_field_name")]
    pub name: Option<String>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub searchable: bool,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub orderable: bool,
    #[serde(default)]
    pub search: Option<SearchValue>,
}

impl ColumnDescriptor {
    /// Column bound through its `data` attribute.
    #[must_use]
    pub fn data(field: impl Into<String>) -> Self {
        Self {
            data: Some(field.into()),
            searchable: true,
            orderable: true,
            ..Default::default()
        }
    }

    /// Column bound through its `name` attribute.
    #[must_use]
    pub fn named(field: impl Into<String>) -> Self {
        Self {
            name: Some(field.into()),
            searchable: true,
            orderable: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    #[must_use]
    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(SearchValue::new(value));
        self
    }

    /// The field name carried by the selected attribute, if it is non-empty.
    #[must_use]
    pub fn field(&self, selector: FieldSelector) -> Option<&str> {
        let field = match selector {
            FieldSelector::Data => self.data.as_deref(),
            FieldSelector::Name => self.name.as_deref(),
        };
        field.filter(|f| !f.is_empty())
    }

    /// Trimmed per-column search text, empty when none was sent.
    #[must_use]
    pub fn search_value(&self) -> &str {
        self.search.as_ref().map_or("", SearchValue::trimmed)
    }
}

/// Column attributes arrive as strings, as array indices (numbers) or, for
/// orthogonal data sources, as objects. Only the first two name a field.
fn deserialize_field_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Anything other than `asc` (in any case) sorts descending.
impl FromStr for SortDirection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else {
            Ok(Self::Desc)
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl From<SortDirection> for sea_orm::sea_query::Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// One sort key: an index into [`GridRequest::columns`] and a direction.
#[serde_as]
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct SortDirective {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub column: usize,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub dir: SortDirection,
}

impl SortDirective {
    #[must_use]
    pub const fn new(column: usize, dir: SortDirection) -> Self {
        Self { column, dir }
    }
}

/// Server-side processing parameters sent by a data grid.
///
/// # Pagination
/// `start` is the absolute row offset. `length` caps the page size; a value
/// of zero or below (grids send `-1` for "show all") leaves the page unbounded.
///
/// # Sorting
/// `order` entries are applied in the order they were sent, producing a
/// multi-key sort.
///
/// # Searching
/// `search.value` is matched against every searchable column. Each column's
/// own `search.value` filters that column alone and may start with an
/// operator token such as `[!=]`, `[%]`, `[<]` or `[>]`.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct GridRequest {
    /// Opaque token echoed back unchanged in the response.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub draw: serde_json::Value,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub order: Vec<SortDirective>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub start: Option<u64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub length: Option<i64>,
    #[serde(default)]
    pub search: Option<SearchValue>,
}

impl GridRequest {
    /// Trimmed global search text, empty when none was sent.
    #[must_use]
    pub fn search_value(&self) -> &str {
        self.search.as_ref().map_or("", SearchValue::trimmed)
    }
}

/// Response envelope of the server-side processing protocol.
///
/// `recordsTotal` ignores every filter, `recordsFiltered` counts rows
/// matching the search predicates before pagination.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse<T> {
    pub data: Vec<T>,
    #[schema(value_type = Object)]
    pub draw: serde_json::Value,
    pub records_filtered: u64,
    pub records_total: u64,
}
