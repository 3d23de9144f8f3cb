//! A parsed set of OData query options.

use std::collections::BTreeMap;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::expression::Expression;
use crate::ordering::OrderBy;
use crate::projection::Projection;

/// Names the entity type a query targets. Only used to look up its key column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct EntityType(pub String);

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let EntityType(name) = self;
        write!(f, "{name}")
    }
}

/// The system query options a request may carry.
///
/// Options are validated in declaration order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum QueryOption {
    Count,
    DeltaToken,
    Format,
    Filter,
    OrderBy,
    Search,
    Select,
    Expand,
    Skip,
    SkipToken,
    Top,
    Apply,
}

impl QueryOption {
    /// The query string key of the option, e.g. `$filter`.
    pub fn key(self) -> &'static str {
        match self {
            QueryOption::Count => "$count",
            QueryOption::DeltaToken => "$deltatoken",
            QueryOption::Format => "$format",
            QueryOption::Filter => "$filter",
            QueryOption::OrderBy => "$orderby",
            QueryOption::Search => "$search",
            QueryOption::Select => "$select",
            QueryOption::Expand => "$expand",
            QueryOption::Skip => "$skip",
            QueryOption::SkipToken => "$skiptoken",
            QueryOption::Top => "$top",
            QueryOption::Apply => "$apply",
        }
    }

    pub fn from_key(key: &str) -> Option<QueryOption> {
        enum_iterator::all::<QueryOption>().find(|option| option.key() == key)
    }
}

impl std::fmt::Display for QueryOption {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The raw, unparsed values of the recognized query options. Unrecognized keys are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct RawValues(BTreeMap<QueryOption, String>);

impl RawValues {
    pub fn new<K: AsRef<str>, V: Into<String>>(options: impl IntoIterator<Item = (K, V)>) -> Self {
        RawValues(
            options
                .into_iter()
                .filter_map(|(key, value)| {
                    QueryOption::from_key(key.as_ref()).map(|option| (option, value.into()))
                })
                .collect(),
        )
    }

    pub fn get(&self, option: QueryOption) -> Option<&str> {
        self.0.get(&option).map(String::as_str)
    }

    pub fn contains(&self, option: QueryOption) -> bool {
        self.0.contains_key(&option)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, String>> for RawValues {
    fn from(options: BTreeMap<String, String>) -> Self {
        RawValues::new(options)
    }
}

impl From<RawValues> for BTreeMap<String, String> {
    fn from(RawValues(values): RawValues) -> Self {
        values
            .into_iter()
            .map(|(option, value)| (option.key().to_string(), value))
            .collect()
    }
}

/// The typed query options of a single request.
///
/// A value of this type is built once per request and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Projection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<bool>,
    #[serde(default, skip_serializing_if = "RawValues::is_empty")]
    pub raw_values: RawValues,
}

impl ParsedQuery {
    /// A query with no options at all.
    pub fn new(entity_type: impl Into<String>) -> Self {
        ParsedQuery {
            entity_type: EntityType(entity_type.into()),
            filter: None,
            order_by: None,
            select: None,
            skip: None,
            top: None,
            count: None,
            raw_values: RawValues::default(),
        }
    }

    /// Whether the companion row-count query was requested.
    pub fn wants_count(&self) -> bool {
        self.count == Some(true)
    }

    /// Whether the option was supplied, either as a typed value or as a raw value.
    pub fn has_option(&self, option: QueryOption) -> bool {
        let typed = match option {
            QueryOption::Count => self.count.is_some(),
            QueryOption::Filter => self.filter.is_some(),
            QueryOption::OrderBy => self.order_by.is_some(),
            QueryOption::Select => self.select.is_some(),
            QueryOption::Skip => self.skip.is_some(),
            QueryOption::Top => self.top.is_some(),
            QueryOption::DeltaToken
            | QueryOption::Format
            | QueryOption::Search
            | QueryOption::Expand
            | QueryOption::SkipToken
            | QueryOption::Apply => false,
        };
        typed || self.raw_values.contains(option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn raw_values_drop_unknown_keys() {
        let raw = RawValues::new([("$filter", "Id eq 1"), ("$custom", "1"), ("filter", "x")]);
        assert_eq!(raw.get(QueryOption::Filter), Some("Id eq 1"));
        assert_eq!(BTreeMap::from(raw).len(), 1);
    }

    #[test]
    fn options_are_present_when_typed_or_raw() {
        let mut query = ParsedQuery::new("Customer");
        query.top = Some(5);
        query.raw_values = RawValues::new([("$format", "json")]);

        assert!(query.has_option(QueryOption::Top));
        assert!(query.has_option(QueryOption::Format));
        assert!(!query.has_option(QueryOption::Skip));
        assert!(!query.has_option(QueryOption::Search));
    }

    #[test]
    fn deserializes_a_minimal_query() {
        let query: ParsedQuery = serde_json::from_value(serde_json::json!({
            "entity_type": "Customer",
            "top": 20,
            "raw_values": { "$top": "20", "$unknown": "x" }
        }))
        .unwrap();

        let mut expected = ParsedQuery::new("Customer");
        expected.top = Some(20);
        expected.raw_values = RawValues::new([("$top", "20")]);
        assert_eq!(query, expected);
        assert!(!query.wants_count());
    }
}
