use pretty_assertions::assert_eq;
use querycraft_sql::{
    stmt::{Boolean, Column, Condition, Direction, Limit, Op, OrderBy, Select, TableName, Value},
    Compiled, Serializer, Statement,
};

fn users() -> Select {
    Select::new(TableName::new("users"))
}

fn compile(serializer: Serializer, select: Select) -> Compiled {
    serializer.compile(&Statement::Select(select))
}

#[test]
fn select_where_eq() {
    let mut select = users();
    select.filter.push(Condition::eq("id", 1));

    let compiled = compile(Serializer::sqlite(), select);
    assert_eq!(compiled.sql, r#"SELECT * FROM "users" WHERE "id" = ?"#);
    assert_eq!(compiled.params, vec![Value::I64(1)]);
}

#[test]
fn select_without_filter_has_no_where() {
    let compiled = compile(Serializer::sqlite(), users());
    assert_eq!(compiled.sql, r#"SELECT * FROM "users""#);
    assert!(compiled.params.is_empty());
}

#[test]
fn booleans_join_conditions_and_first_is_dropped() {
    let mut select = users();
    select
        .filter
        .push(Condition::new("name", Op::Like, Some("a%".into()), Boolean::Or));
    select
        .filter
        .push(Condition::new("age", Op::Ge, Some(18.into()), Boolean::And));
    select
        .filter
        .push(Condition::new("email", Op::IsNotNull, None, Boolean::Or));

    let compiled = compile(Serializer::sqlite(), select);
    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "users" WHERE "name" LIKE ? AND "age" >= ? OR "email" IS NOT NULL"#
    );
    assert_eq!(compiled.params, vec![Value::from("a%"), Value::I64(18)]);
}

#[test]
fn scopes_are_anded_after_grouped_or() {
    let mut select = users();
    select.filter.push(Condition::eq("role", "admin"));
    select
        .filter
        .push(Condition::new("role", Op::Eq, Some("owner".into()), Boolean::Or));
    select.filter.push_scope(Condition::is_null("deleted_at"));

    let compiled = compile(Serializer::sqlite(), select);
    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "users" WHERE ("role" = ? OR "role" = ?) AND "deleted_at" IS NULL"#
    );
}

#[test]
fn scope_alone() {
    let mut select = users();
    select.filter.push_scope(Condition::is_null("deleted_at"));

    let compiled = compile(Serializer::sqlite(), select);
    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "users" WHERE "deleted_at" IS NULL"#
    );
}

#[test]
fn columns_group_and_order() {
    let mut select = users();
    select.columns = vec![
        Column::name("users.id"),
        Column::name("name as display_name"),
        Column::name("COUNT(*) AS total"),
    ];
    select.group_by = vec!["users.id".into(), "name".into()];
    select.order_by = vec![OrderBy {
        column: "name".into(),
        direction: Direction::Desc,
    }];

    let compiled = compile(Serializer::sqlite(), select);
    assert_eq!(
        compiled.sql,
        r#"SELECT "users"."id", "name" AS "display_name", COUNT(*) AS total FROM "users" GROUP BY "users"."id", "name" ORDER BY "name" DESC"#
    );
}

#[test]
fn count_projection() {
    let mut select = users();
    select.columns = vec![Column::count("*", "aggregate")];

    let compiled = compile(Serializer::sqlite(), select);
    assert_eq!(
        compiled.sql,
        r#"SELECT COUNT(*) AS "aggregate" FROM "users""#
    );
}

#[test]
fn schema_qualified_table() {
    let select = Select::new(TableName::new("orders").with_schema(Some("shop")));

    assert_eq!(
        compile(Serializer::postgresql(), select.clone()).sql,
        r#"SELECT * FROM "shop"."orders""#
    );
    assert_eq!(
        compile(Serializer::sql_server(), select).sql,
        "SELECT * FROM [shop].[orders]"
    );
}

#[test]
fn placeholder_count_matches_params() {
    let mut select = users();
    for (i, column) in ["a", "b", "c", "d"].iter().enumerate() {
        select
            .filter
            .push(Condition::new(*column, Op::Gt, Some((i as i64).into()), Boolean::And));
    }
    select.filter.push(Condition::is_null("e"));

    let compiled = compile(Serializer::sqlite(), select.clone());
    assert_eq!(compiled.sql.matches('?').count(), compiled.params.len());
    assert_eq!(compiled.params.len(), 4);

    let compiled = compile(Serializer::postgresql(), select);
    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "users" WHERE "a" > $1 AND "b" > $2 AND "c" > $3 AND "d" > $4 AND "e" IS NULL"#
    );
}

#[test]
fn compile_is_idempotent() {
    let mut select = users();
    select.filter.push(Condition::eq("id", 7));
    select.limit = Some(Limit {
        limit: 1,
        offset: None,
    });
    let stmt = Statement::Select(select);

    let serializer = Serializer::mysql();
    assert_eq!(serializer.compile(&stmt), serializer.compile(&stmt));
}
