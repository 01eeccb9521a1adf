mod support;

use pretty_assertions::assert_eq;
use querycraft::{Dialect, Direction, EntityMetadata, ExecutionContext, Op, Value};
use support::scripted_db;

fn users() -> EntityMetadata {
    EntityMetadata::builder("users").build()
}

fn posts() -> EntityMetadata {
    EntityMetadata::builder("posts")
        .soft_delete_field("deleted_at")
        .build()
}

#[test]
fn filter_eq_binds_one_placeholder() {
    let (db, _) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let compiled = db.table(users()).filter_eq("id", 1).to_sql().unwrap();

    assert_eq!(compiled.sql, r#"SELECT * FROM "users" WHERE "id" = ?"#);
    assert_eq!(compiled.params, vec![Value::I64(1)]);
}

#[test]
fn to_sql_is_idempotent() {
    let (db, _) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let mut query = db.table(users());
    query
        .filter("age", Op::Gt, 21)
        .or_filter_is_null("age")
        .order_by("name", Direction::Desc)
        .limit(5, None);

    let first = query.to_sql().unwrap();
    let second = query.to_sql().unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.sql,
        r#"SELECT * FROM "users" WHERE "age" > ? OR "age" IS NULL ORDER BY "name" DESC LIMIT 5"#
    );
}

#[test]
fn bindings_match_placeholders() {
    let (db, _) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let mut query = db.table(users());
    query
        .filter_eq("a", 1)
        .filter_is_not_null("b")
        .or_filter("c", Op::Like, "x%")
        .filter("d", Op::Ne, "y")
        .filter_is_null("e");

    let compiled = query.to_sql().unwrap();

    assert_eq!(compiled.sql.matches('?').count(), compiled.params.len());
    assert_eq!(
        compiled.params,
        vec![Value::I64(1), Value::from("x%"), Value::from("y")]
    );
}

#[test]
fn null_operators_drop_their_value() {
    let (db, _) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let compiled = db
        .table(users())
        .filter("email", Op::IsNull, "ignored")
        .to_sql()
        .unwrap();

    assert_eq!(compiled.sql, r#"SELECT * FROM "users" WHERE "email" IS NULL"#);
    assert!(compiled.params.is_empty());
}

#[test]
fn parsed_operators() {
    let (db, _) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let op: Op = "!=".parse().unwrap();
    let compiled = db.table(users()).filter("role", op, "guest").to_sql().unwrap();
    assert_eq!(compiled.sql, r#"SELECT * FROM "users" WHERE "role" <> ?"#);

    let err = "= 1 OR 1 =".parse::<Op>().unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn soft_delete_scope() {
    let (db, _) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let compiled = db.table(posts()).to_sql().unwrap();
    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "posts" WHERE "deleted_at" IS NULL"#
    );

    let compiled = db
        .table(posts())
        .filter_eq("author_id", 7)
        .or_filter_eq("author_id", 8)
        .to_sql()
        .unwrap();
    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "posts" WHERE ("author_id" = ? OR "author_id" = ?) AND "deleted_at" IS NULL"#
    );

    let compiled = db
        .table(posts())
        .filter_eq("author_id", 7)
        .with_deleted()
        .to_sql()
        .unwrap();
    assert_eq!(compiled.sql, r#"SELECT * FROM "posts" WHERE "author_id" = ?"#);
}

#[test]
fn postgresql_numbers_placeholders() {
    let (db, _) = scripted_db(Dialect::Postgresql, ExecutionContext::default());

    let compiled = db
        .table(users())
        .select(["id", "name"])
        .filter("age", Op::Ge, 18)
        .filter("name", Op::Like, "a%")
        .order_by("name", Direction::Asc)
        .limit(10, Some(5))
        .to_sql()
        .unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT "id", "name" FROM "users" WHERE "age" >= $1 AND "name" LIKE $2 ORDER BY "name" ASC LIMIT 10 OFFSET 5"#
    );
}

#[test]
fn sql_server_pagination() {
    let (db, _) = scripted_db(Dialect::SqlServer, ExecutionContext::default());

    let compiled = db.table(users()).limit(10, Some(5)).to_sql().unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM [dbo].[users] ORDER BY (SELECT NULL) OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"
    );

    let compiled = db.table(users()).limit(10, None).to_sql().unwrap();
    assert_eq!(compiled.sql, "SELECT TOP(10) * FROM [dbo].[users]");
}

#[test]
fn mysql_quotes_with_backticks_and_passes_functions() {
    let (db, _) = scripted_db(Dialect::Mysql, ExecutionContext::default());

    let compiled = db
        .table(EntityMetadata::builder("orders").schema("shop").build())
        .select(["COUNT(*) AS total", "status"])
        .group_by(["status"])
        .to_sql()
        .unwrap();

    assert_eq!(
        compiled.sql,
        "SELECT COUNT(*) AS total, `status` FROM `shop`.`orders` GROUP BY `status`"
    );
}

#[test]
fn empty_table_name_is_configuration_error() {
    let (db, _) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let err = db.table(EntityMetadata::new("")).to_sql().unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn terminal_call_resets_state() {
    let (db, log) = scripted_db(Dialect::Sqlite, ExecutionContext::default());

    let mut query = db.table(users());
    query.filter_eq("id", 1).limit(1, None);
    query.get().await.unwrap();

    assert_eq!(log.sql(), [r#"SELECT * FROM "users" WHERE "id" = ? LIMIT 1"#]);
    assert_eq!(query.to_sql().unwrap().sql, r#"SELECT * FROM "users""#);
}

#[tokio::test]
async fn snapshots_drive_paging() {
    let cx = ExecutionContext::builder().cache_enabled(false).build();
    let (db, log) = scripted_db(Dialect::Sqlite, cx);

    let mut query = db.table(users());
    query
        .filter_eq("active", true)
        .order_by("id", Direction::Asc)
        .take_snapshot(None)
        .limit(2, Some(0));
    query.get().await.unwrap();

    query.restore_snapshot(None).unwrap().limit(2, Some(2));
    query.get().await.unwrap();

    // Restoring clears the previous window
    query.restore_snapshot(None).unwrap();
    query.get().await.unwrap();

    assert_eq!(
        log.sql(),
        [
            r#"SELECT * FROM "users" WHERE "active" = ? ORDER BY "id" ASC LIMIT 2 OFFSET 0"#,
            r#"SELECT * FROM "users" WHERE "active" = ? ORDER BY "id" ASC LIMIT 2 OFFSET 2"#,
            r#"SELECT * FROM "users" WHERE "active" = ? ORDER BY "id" ASC"#,
        ]
    );

    let err = query.restore_snapshot(Some("missing")).unwrap_err();
    assert!(err.is_invalid_statement());
}
