use pretty_assertions::assert_eq;
use querycraft_core::{
    driver::{
        operation::{ExecSql, QuerySql},
        Connection as _, Dialect, Driver, Rows,
    },
    record,
    stmt::Value,
};
use querycraft_driver_sqlite::{Connection, Sqlite};

fn exec_sql(sql: &str, params: Vec<Value>) -> ExecSql {
    ExecSql {
        sql: sql.to_string(),
        params,
        last_insert_id: false,
    }
}

#[test]
fn parse_url() {
    assert!(matches!(Sqlite::new("sqlite::memory:").unwrap(), Sqlite::InMemory));
    assert!(matches!(
        Sqlite::new("sqlite:/tmp/app.db").unwrap(),
        Sqlite::File(path) if path.to_str() == Some("/tmp/app.db")
    ));

    let err = Sqlite::new("postgresql://localhost/app").unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn insert_then_query() {
    let mut conn = Sqlite::in_memory().connect().await.unwrap();
    assert_eq!(conn.dialect(), Dialect::Sqlite);

    conn.exec(
        exec_sql(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, score REAL)",
            vec![],
        )
        .into(),
    )
    .await
    .unwrap();

    let res = conn
        .exec(
            ExecSql {
                sql: "INSERT INTO users (name, score) VALUES (?, ?), (?, ?)".to_string(),
                params: vec!["ann".into(), 1.5.into(), "bob".into(), Value::Null],
                last_insert_id: true,
            }
            .into(),
        )
        .await
        .unwrap();

    assert!(matches!(res.rows, Rows::Count(2)));
    assert_eq!(res.last_insert_id, Some(Value::I64(2)));

    let res = conn
        .exec(
            QuerySql {
                sql: "SELECT id, name, score FROM users WHERE id >= ? ORDER BY id".to_string(),
                params: vec![1.into()],
            }
            .into(),
        )
        .await
        .unwrap();

    let rows = res.rows.into_values().unwrap();
    assert_eq!(
        rows,
        vec![
            record! { "id" => 1, "name" => "ann", "score" => 1.5 },
            record! { "id" => 2, "name" => "bob", "score" => Value::Null },
        ]
    );
}

#[tokio::test]
async fn driver_errors_surface() {
    let mut conn = Connection::in_memory().unwrap();

    let err = conn
        .exec(exec_sql("INSERT INTO missing (a) VALUES (?)", vec![1.into()]).into())
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert!(err.to_string().contains("no such table"));
}
