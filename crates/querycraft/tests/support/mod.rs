#![allow(dead_code)]

use querycraft::{
    driver::{operation::Operation, Connection, Dialect, Response},
    Db, ExecutionContext, Record, Result,
};
use querycraft_core::{async_trait, driver::Driver};
use querycraft_driver_sqlite::Sqlite;

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

/// An operation seen by [`LoggingConnection`] and what it answered.
#[derive(Debug, Clone)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Response,
}

/// Shared view of everything a [`LoggingConnection`] executed.
#[derive(Debug, Clone, Default)]
pub struct OpsLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
    scripted: Arc<Mutex<VecDeque<Response>>>,
    gate: Arc<Mutex<Option<Gate>>>,
}

/// Holds the next query open until the test lets it go.
#[derive(Debug)]
struct Gate {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Test side of a paused query.
#[derive(Debug)]
pub struct Paused {
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

impl OpsLog {
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.sql().to_string())
            .collect()
    }

    pub fn last(&self) -> Option<DriverOp> {
        self.ops.lock().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Queues the response for the next operation of a scripted connection.
    pub fn respond(&self, response: Response) {
        self.scripted.lock().unwrap().push_back(response);
    }

    /// Makes the next query signal `started` and wait for `release` before
    /// it is answered.
    pub fn pause_next_query(&self) -> Paused {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();

        *self.gate.lock().unwrap() = Some(Gate {
            started: started_tx,
            release: release_rx,
        });

        Paused {
            started: started_rx,
            release: release_tx,
        }
    }
}

/// Records every operation before answering it, either from a real
/// connection or from scripted responses.
#[derive(Debug)]
pub struct LoggingConnection {
    inner: Option<Box<dyn Connection>>,
    dialect: Dialect,
    log: OpsLog,
}

impl LoggingConnection {
    pub fn wrap(inner: Box<dyn Connection>) -> (Self, OpsLog) {
        let log = OpsLog::default();
        let conn = LoggingConnection {
            dialect: inner.dialect(),
            inner: Some(inner),
            log: log.clone(),
        };
        (conn, log)
    }

    /// Answers queries with queued responses, falling back to no rows or
    /// zero affected rows.
    pub fn scripted(dialect: Dialect) -> (Self, OpsLog) {
        let log = OpsLog::default();
        let conn = LoggingConnection {
            inner: None,
            dialect,
            log: log.clone(),
        };
        (conn, log)
    }
}

#[async_trait]
impl Connection for LoggingConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn exec(&mut self, operation: Operation) -> Result<Response> {
        let logged = operation.clone();

        if operation.is_query() {
            let gate = self.log.gate.lock().unwrap().take();

            if let Some(gate) = gate {
                let _ = gate.started.send(());
                let _ = gate.release.await;
            }
        }

        let response = match &mut self.inner {
            Some(inner) => inner.exec(operation).await?,
            None => {
                let queued = self.log.scripted.lock().unwrap().pop_front();
                queued.unwrap_or_else(|| match operation {
                    Operation::QuerySql(_) => Response::values(vec![]),
                    Operation::ExecSql(_) => Response::count(0),
                })
            }
        };

        self.log.ops.lock().unwrap().push(DriverOp {
            operation: logged,
            response: response.clone(),
        });

        Ok(response)
    }
}

/// Routes `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A `Db` over a scripted connection.
pub fn scripted_db(dialect: Dialect, cx: ExecutionContext) -> (Db, OpsLog) {
    init_tracing();

    let (conn, log) = LoggingConnection::scripted(dialect);
    let db = Db::builder().context(cx).build(Box::new(conn));
    (db, log)
}

/// A `Db` over a fresh in-memory SQLite database, logged.
pub async fn sqlite_db(cx: ExecutionContext, schema: &[&str]) -> (Db, OpsLog) {
    init_tracing();

    let inner = Sqlite::in_memory().connect().await.unwrap();
    let (conn, log) = LoggingConnection::wrap(inner);
    let db = Db::builder().context(cx).build(Box::new(conn));

    for ddl in schema {
        db.exec_raw(ddl, vec![]).await.unwrap();
    }

    log.clear();
    (db, log)
}

pub fn rows(rows: Vec<Record>) -> Response {
    Response::values(rows)
}
