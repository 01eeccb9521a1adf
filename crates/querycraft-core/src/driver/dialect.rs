use crate::Error;

use std::{fmt, str::FromStr};

/// Target SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Sqlite,
    Postgresql,
    Mysql,
    SqlServer,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
            Dialect::SqlServer => "sqlserver",
        }
    }

    /// Schema assumed for unqualified tables, if the dialect has one.
    pub fn default_schema(self) -> Option<&'static str> {
        match self {
            Dialect::SqlServer => Some("dbo"),
            _ => None,
        }
    }

    /// Maps a connection URL scheme to a dialect.
    pub fn from_scheme(scheme: &str) -> Option<Dialect> {
        Some(match scheme {
            "sqlite" => Dialect::Sqlite,
            "postgres" | "postgresql" => Dialect::Postgresql,
            "mysql" => Dialect::Mysql,
            "sqlserver" | "mssql" => Dialect::SqlServer,
            _ => return None,
        })
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_scheme(&s.to_ascii_lowercase())
            .ok_or_else(|| Error::configuration(format!("unsupported dialect `{s}`")))
    }
}
