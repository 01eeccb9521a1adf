/// Builds a [`Record`](crate::stmt::Record) from `name => value` pairs.
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    (
        $( $name:expr => $value:expr ),+ $(,)?
    ) => {
        [ $( ($name, $crate::stmt::Value::from($value)), )+ ]
            .into_iter()
            .collect::<$crate::stmt::Record>()
    };
}
