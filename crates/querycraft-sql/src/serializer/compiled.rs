use querycraft_core::stmt::Value;

use std::fmt;

/// SQL text plus the values for its placeholders, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Compiled {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Compiled {
        Compiled {
            sql: sql.into(),
            params,
        }
    }
}

impl fmt::Display for Compiled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
