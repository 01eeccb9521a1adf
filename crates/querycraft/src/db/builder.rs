use super::{connect::Connect, Db};
use crate::{engine::Engine, ExecutionContext};

use querycraft_core::{
    driver::{Connection, Driver},
    Result,
};

use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Builder {
    /// Shared context; a default one is built when unset
    cx: Option<Arc<ExecutionContext>>,
}

impl Builder {
    pub fn context(&mut self, cx: impl Into<Arc<ExecutionContext>>) -> &mut Self {
        self.cx = Some(cx.into());
        self
    }

    /// Opens a connection from a URL such as `sqlite::memory:`.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.open(Connect::new(url)?).await
    }

    /// Opens a connection through `driver`.
    pub async fn open(&mut self, driver: impl Driver) -> Result<Db> {
        debug!(dialect = %driver.dialect(), "opening connection");

        let connection = driver.connect().await?;
        Ok(self.build(connection))
    }

    /// Wraps an already open connection.
    pub fn build(&mut self, connection: Box<dyn Connection>) -> Db {
        let cx = self.cx.clone().unwrap_or_default();

        Db {
            engine: Arc::new(Engine::new(cx, connection)),
        }
    }
}
