use super::{Delimited, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Boolean};

impl ToSql for &stmt::Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.is_empty() {
            return;
        }

        f.dst.push_str(" WHERE ");

        // An OR among the caller's predicates must not swallow the scopes
        let group = !self.scopes.is_empty()
            && self.conditions.len() > 1
            && self.conditions.iter().any(|cond| cond.boolean == Boolean::Or);

        if group {
            f.dst.push('(');
        }

        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                fmt!(f, " ", condition.boolean.as_sql(), " ");
            }
            condition.to_sql(f);
        }

        if group {
            f.dst.push(')');
        }

        if !self.scopes.is_empty() {
            if !self.conditions.is_empty() {
                f.dst.push_str(" AND ");
            }
            fmt!(f, Delimited(&self.scopes, " AND "));
        }
    }
}

impl ToSql for &stmt::Condition {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.column), " ", self.op.as_sql());

        if let Some(value) = &self.value {
            fmt!(f, " ", value);
        }
    }
}
