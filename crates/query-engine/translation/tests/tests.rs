mod common;

use odata_models::{Expression, ParsedQuery};
use query_engine_metadata::metadata::Resolvers;
use query_engine_translation::translation;
use serde_json::json;
use similar_asserts::assert_eq;

#[test]
fn count_without_options() {
    let (query, count) = common::test_translation("count_without_options").unwrap();
    insta::assert_snapshot!(query.sql, @"SELECT * FROM");
    assert_eq!(query.arguments, json!([]));

    let count = count.unwrap();
    insta::assert_snapshot!(count.sql, @"SELECT COUNT([Id]) FROM");
    assert_eq!(count.arguments, json!([]));
}

#[test]
fn paging() {
    let (query, count) = common::test_translation("paging").unwrap();
    insta::assert_snapshot!(
        query.sql,
        @"SELECT * FROM ORDER BY [Id] DESC OFFSET 40 ROWS FETCH NEXT 20 ROWS ONLY"
    );
    assert!(count.is_none());
}

#[test]
fn filter_with_null_comparison() {
    let (query, _) = common::test_translation("filter_with_null_comparison").unwrap();
    insta::assert_snapshot!(
        query.sql,
        @"SELECT * FROM WHERE ((([Id] = @p0) AND (([Name] = @p1) OR (LOWER([Name]) = @p2))) AND ([Name] IS NOT NULL))"
    );
    assert_eq!(query.arguments, json!([1, "text", "other"]));
}

#[test]
fn command_top_wins() {
    let (query, _) = common::test_translation("command_top_wins").unwrap();
    insta::assert_snapshot!(query.sql, @"SELECT TOP(40) * FROM");
}

#[test]
fn positional_arguments() {
    let (query, count) = common::test_translation("positional_arguments").unwrap();
    insta::assert_snapshot!(
        query.sql,
        @"SELECT [Id], [Name] FROM [Customers] WHERE [Region] = @p0 AND ([AgeInYears] > @p1) ORDER BY [Name] OFFSET 10 ROWS"
    );
    assert_eq!(query.arguments, json!(["EU", 30]));

    let count = count.unwrap();
    insta::assert_snapshot!(
        count.sql,
        @"SELECT COUNT([CustomerId]) FROM [Customers] WHERE [Region] = @p0 AND ([AgeInYears] > @p1)"
    );
    assert_eq!(count.arguments, json!(["EU", 30]));
}

#[test]
fn select_columns() {
    let (query, _) = common::test_translation("select_columns").unwrap();
    insta::assert_snapshot!(
        query.sql,
        @"SELECT TOP(5) [Name], [Email] FROM [Customers] WHERE ([Email] LIKE (@p0 + '%'))"
    );
    assert_eq!(query.arguments, json!(["admin"]));
}

#[test]
fn navigation_in_filter() {
    let error = common::test_translation("navigation_in_filter").unwrap_err();
    assert_eq!(
        error.downcast_ref::<translation::error::Error>(),
        Some(&translation::error::Error::UnsupportedNode(
            "the navigation property 'Customer/City'".to_string()
        ))
    );
}

#[test]
fn translation_is_computed_once() {
    let mut parsed = ParsedQuery::new("Customer");
    parsed.filter = Some(Expression::equal(
        Expression::property("Id"),
        Expression::constant(7),
    ));
    let resolvers = Resolvers::default();
    let query = translation::query::SqlQuery::from_query(&parsed, &resolvers);

    let first = query.command_text().unwrap();
    let second = query.command_text().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(query.arguments().unwrap(), &[json!(7)]);
    assert_eq!(query.arguments().unwrap(), &[json!(7)]);
    assert!(query.count().is_none());
}

#[test]
fn unsupported_command_shape() {
    let parsed = ParsedQuery::new("Customer");
    let resolvers = Resolvers::default();
    let query = translation::query::SqlQuery::new(
        "UPDATE [Customers] SET [Name] = 'x'",
        vec![],
        &parsed,
        &resolvers,
    );

    assert_eq!(
        query.command_text(),
        Err(translation::error::Error::UnsupportedCommandShape(
            "UPDATE [Customers] SET [Name] = 'x'".to_string()
        ))
    );
}

#[test]
fn count_only_when_asked_for() {
    let mut parsed = ParsedQuery::new("Customer");
    let resolvers = Resolvers::default();
    parsed.count = Some(false);

    assert_eq!(
        translation::query::translate_count("SELECT FROM", vec![], &parsed, &resolvers),
        Ok(None)
    );
}
