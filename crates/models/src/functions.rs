//! The built-in functions of the filter language.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Every function name the filter language knows about, including the lambda quantifiers.
/// Not all of these can be translated to SQL.
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
pub enum Function {
    Contains,
    EndsWith,
    StartsWith,
    Length,
    IndexOf,
    Substring,
    ToLower,
    ToUpper,
    Trim,
    Concat,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    FractionalSeconds,
    Date,
    Time,
    TotalOffsetMinutes,
    Now,
    MaxDateTime,
    MinDateTime,
    TotalSeconds,
    Round,
    Floor,
    Ceiling,
    IsOf,
    Cast,
    Any,
    All,
}

impl Function {
    /// The name of the function as written in a query.
    pub fn name(self) -> &'static str {
        match self {
            Function::Contains => "contains",
            Function::EndsWith => "endswith",
            Function::StartsWith => "startswith",
            Function::Length => "length",
            Function::IndexOf => "indexof",
            Function::Substring => "substring",
            Function::ToLower => "tolower",
            Function::ToUpper => "toupper",
            Function::Trim => "trim",
            Function::Concat => "concat",
            Function::Year => "year",
            Function::Month => "month",
            Function::Day => "day",
            Function::Hour => "hour",
            Function::Minute => "minute",
            Function::Second => "second",
            Function::FractionalSeconds => "fractionalseconds",
            Function::Date => "date",
            Function::Time => "time",
            Function::TotalOffsetMinutes => "totaloffsetminutes",
            Function::Now => "now",
            Function::MaxDateTime => "maxdatetime",
            Function::MinDateTime => "mindatetime",
            Function::TotalSeconds => "totalseconds",
            Function::Round => "round",
            Function::Floor => "floor",
            Function::Ceiling => "ceiling",
            Function::IsOf => "isof",
            Function::Cast => "cast",
            Function::Any => "any",
            Function::All => "all",
        }
    }

    /// Look a function up by the name used in a query. Names are case sensitive.
    pub fn from_name(name: &str) -> Option<Function> {
        enum_iterator::all::<Function>().find(|function| function.name() == name)
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Function;

    #[test]
    fn names_match_their_serialized_form() {
        for function in enum_iterator::all::<Function>() {
            let serialized = serde_json::to_value(function).unwrap();
            assert_eq!(serialized, serde_json::Value::from(function.name()));
            assert_eq!(Function::from_name(function.name()), Some(function));
        }
    }

    #[test]
    fn unknown_names_are_not_functions() {
        assert_eq!(Function::from_name("ToLower"), None);
        assert_eq!(Function::from_name("geo.distance"), None);
    }
}
