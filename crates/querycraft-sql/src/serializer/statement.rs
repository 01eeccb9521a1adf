use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Limit};

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Truncate(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let sql_server = f.serializer.is_sql_server();

        fmt!(f, "SELECT ");

        // SQL Server takes a bare limit as TOP(n)
        if let Some(Limit {
            limit,
            offset: None,
        }) = self.limit
        {
            if sql_server {
                fmt!(f, "TOP(", limit, ") ");
            }
        }

        fmt!(f, Comma(&self.columns), " FROM ", &self.table, &self.filter);

        if !self.group_by.is_empty() {
            fmt!(f, " GROUP BY ", Comma(self.group_by.iter().map(Ident)));
        }

        let offset_fetch = sql_server && matches!(self.limit, Some(Limit { offset: Some(_), .. }));

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY ", Comma(&self.order_by));
        } else if offset_fetch {
            // OFFSET .. FETCH is only valid after an ORDER BY
            fmt!(f, " ORDER BY (SELECT NULL)");
        }

        match self.limit {
            Some(Limit {
                limit,
                offset: Some(offset),
            }) if sql_server => {
                fmt!(f, " OFFSET ", offset, " ROWS FETCH NEXT ", limit, " ROWS ONLY");
            }
            Some(_) if sql_server => {}
            Some(Limit { limit, offset }) => {
                fmt!(f, " LIMIT ", limit);

                if let Some(offset) = offset {
                    fmt!(f, " OFFSET ", offset);
                }
            }
            None => {}
        }
    }
}

impl ToSql for &stmt::Column {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Column::Name(name) => fmt!(f, Ident(name)),
            stmt::Column::Count { column, alias } => {
                fmt!(f, "COUNT(", Ident(column), ") AS ", Ident(alias));
            }
        }
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.column), " ", self.direction.as_sql());
    }
}

impl ToSql for &stmt::TableName {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(schema) = &self.schema {
            fmt!(f, Ident(schema), ".");
        }

        fmt!(f, Ident(&self.name));
    }
}

struct Row<'a>(&'a [stmt::Value]);

impl ToSql for Row<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "(", Comma(self.0), ")");
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "INSERT INTO ", &self.table);

        if self.columns.is_empty() {
            match f.serializer.dialect() {
                querycraft_core::driver::Dialect::Mysql => fmt!(f, " () VALUES ()"),
                _ => fmt!(f, " DEFAULT VALUES"),
            }
            return;
        }

        let columns = Comma(self.columns.iter().map(Ident));
        let rows = Comma(self.rows.iter().map(|row| Row(row)));

        fmt!(f, " (", columns, ") VALUES ", rows);
    }
}

impl ToSql for &stmt::Assignment {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.column), " = ", &self.value);
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "UPDATE ",
            &self.table,
            " SET ",
            Comma(&self.assignments),
            &self.filter,
        );
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE FROM ", &self.table, &self.filter);
    }
}

impl ToSql for &stmt::Truncate {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if f.serializer.is_sqlite() {
            fmt!(f, "DELETE FROM ", &self.table);
        } else {
            fmt!(f, "TRUNCATE TABLE ", &self.table);
        }
    }
}
