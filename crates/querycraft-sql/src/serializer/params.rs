use super::{Formatter, ToSql};

use querycraft_core::{driver::Dialect, stmt::Value};

pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// 1-based position of a bound parameter.
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match f.serializer.dialect {
            Dialect::Postgresql => {
                f.dst.push('$');
                f.dst.push_str(&self.0.to_string());
            }
            Dialect::Sqlite | Dialect::Mysql | Dialect::SqlServer => f.dst.push('?'),
        }
    }
}

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        placeholder.to_sql(f);
    }
}
