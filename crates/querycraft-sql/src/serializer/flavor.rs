use super::Serializer;

use querycraft_core::driver::Dialect;

impl Serializer {
    pub fn new(dialect: Dialect) -> Serializer {
        Serializer { dialect }
    }

    pub fn sqlite() -> Serializer {
        Serializer::new(Dialect::Sqlite)
    }

    pub fn postgresql() -> Serializer {
        Serializer::new(Dialect::Postgresql)
    }

    pub fn mysql() -> Serializer {
        Serializer::new(Dialect::Mysql)
    }

    pub fn sql_server() -> Serializer {
        Serializer::new(Dialect::SqlServer)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(super) fn is_sqlite(&self) -> bool {
        matches!(self.dialect, Dialect::Sqlite)
    }

    pub(super) fn is_sql_server(&self) -> bool {
        matches!(self.dialect, Dialect::SqlServer)
    }

    /// Opening and closing identifier quote characters.
    pub(super) fn quotes(&self) -> (char, char) {
        match self.dialect {
            Dialect::Mysql => ('`', '`'),
            Dialect::SqlServer => ('[', ']'),
            Dialect::Sqlite | Dialect::Postgresql => ('"', '"'),
        }
    }
}
