mod value;
use value::Value;

use querycraft_core::{
    async_trait,
    driver::{
        operation::{ExecSql, Operation, QuerySql},
        Dialect, Driver, Response,
    },
    stmt::{self, Record},
    Error, Result,
};
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::configuration(format!("invalid connection URL `{url_str}`: {err}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn connect(&self) -> Result<Box<dyn querycraft_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    fn query(&mut self, op: QuerySql) -> Result<Response> {
        let mut stmt = self
            .connection
            .prepare_cached(&op.sql)
            .map_err(Error::driver)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut record = Record::with_capacity(columns.len());

                    for (index, name) in columns.iter().enumerate() {
                        let value = Value::from_sql(row, index)?;
                        record.insert(name.clone(), value.into_inner());
                    }

                    ret.push(record);
                }
                Ok(None) => break,
                Err(err) => return Err(Error::driver(err)),
            }
        }

        Ok(Response::values(ret))
    }

    fn execute(&mut self, op: ExecSql) -> Result<Response> {
        let mut stmt = self
            .connection
            .prepare_cached(&op.sql)
            .map_err(Error::driver)?;

        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();

        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let response = Response::count(count as u64);

        if op.last_insert_id {
            let id = self.connection.last_insert_rowid();
            return Ok(response.with_last_insert_id(stmt::Value::I64(id)));
        }

        Ok(response)
    }
}

#[async_trait]
impl querycraft_core::driver::Connection for Connection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(op) => self.query(op),
            Operation::ExecSql(op) => self.execute(op),
        }
    }
}
