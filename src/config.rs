use serde::Deserialize;
use std::{collections::HashMap, fmt};

/// Which [`ColumnDescriptor`](crate::models::ColumnDescriptor) attribute names
/// the column in the data domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSelector {
    #[default]
    Data,
    Name,
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "data"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// Shape of the rows returned by engines that can map rows onto entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultMode {
    /// Hydrate rows into domain models.
    #[default]
    Object,
    /// Return plain column/value rows.
    Scalar,
}

/// Translation settings shared by every request against one grid.
///
/// A configuration is read-only once built and can be shared between
/// concurrent requests. It deserializes from camelCase keys so it can live in
/// an application config file:
///
/// ```json
/// {
///     "countExpression": "u.id",
///     "columnAliases": {"name": "u.full_name"},
///     "fieldSelector": "data",
///     "caseInsensitive": true,
///     "searchDelimiter": ","
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Expression counted by `COUNT(..)` for both record totals.
    pub count_expression: String,
    /// Logical field name to SQL expression.
    pub column_aliases: HashMap<String, String>,
    pub field_selector: FieldSelector,
    pub result_mode: ResultMode,
    /// Lower-case both sides of every search and filter comparison.
    pub case_insensitive: bool,
    /// Split the global search into terms that must all match.
    pub search_delimiter: Option<String>,
    /// Remove a recognised `[op]` token from per-column filter operands.
    pub strip_operator_prefix: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            count_expression: "*".to_string(),
            column_aliases: HashMap::new(),
            field_selector: FieldSelector::default(),
            result_mode: ResultMode::default(),
            case_insensitive: false,
            search_delimiter: None,
            strip_operator_prefix: false,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_count_expression(mut self, expression: impl Into<String>) -> Self {
        self.count_expression = expression.into();
        self
    }

    /// Replace the whole alias map.
    #[must_use]
    pub fn with_column_aliases<K, V>(mut self, aliases: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.column_aliases = aliases
            .into_iter()
            .map(|(field, expression)| (field.into(), expression.into()))
            .collect();
        self
    }

    #[must_use]
    pub fn with_column_alias(mut self, field: impl Into<String>, expression: impl Into<String>) -> Self {
        self.column_aliases.insert(field.into(), expression.into());
        self
    }

    #[must_use]
    pub const fn with_field_selector(mut self, selector: FieldSelector) -> Self {
        self.field_selector = selector;
        self
    }

    #[must_use]
    pub const fn with_result_mode(mut self, mode: ResultMode) -> Self {
        self.result_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    #[must_use]
    pub fn with_search_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.search_delimiter = Some(delimiter.into());
        self
    }

    #[must_use]
    pub const fn with_operator_prefix_stripping(mut self, strip: bool) -> Self {
        self.strip_operator_prefix = strip;
        self
    }

    /// The configured search delimiter, ignoring an empty one.
    #[must_use]
    pub fn delimiter(&self) -> Option<&str> {
        self.search_delimiter.as_deref().filter(|d| !d.is_empty())
    }

    /// Look up the expression configured for `field`, if any.
    #[must_use]
    pub fn alias_for(&self, field: &str) -> Option<&str> {
        self.column_aliases.get(field).map(String::as_str)
    }
}
