use super::{Formatter, Params, Period, ToSql};

use regex::Regex;
use std::sync::LazyLock;

/// Function-call expressions, optionally aliased, that are emitted verbatim.
static FUNCTION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*
        (?:
            # aggregate
            COUNT | SUM | AVG | MIN | MAX | GROUP_CONCAT | STRING_AGG
            # string
            | UPPER | LOWER | LENGTH | LEN | CHAR_LENGTH | SUBSTR | SUBSTRING | TRIM | LTRIM
            | RTRIM | CONCAT | REPLACE | LEFT | RIGHT
            # date
            | NOW | CURRENT_TIMESTAMP | DATE | TIME | DATETIME | YEAR | MONTH | DAY
            | DATE_FORMAT | STRFTIME | DATEADD | DATEDIFF | EXTRACT | GETDATE
            # math
            | ABS | ROUND | FLOOR | CEIL | CEILING | POWER | SQRT | MOD | RANDOM | RAND
            # window
            | ROW_NUMBER | RANK | DENSE_RANK | LAG | LEAD | FIRST_VALUE | LAST_VALUE | NTILE
            # conversion
            | CAST | CONVERT | COALESCE | IFNULL | ISNULL | NULLIF
        )
        \s*\([^;]*\)
        (?:\s+(?:AS\s+)?[A-Za-z_][A-Za-z0-9_]*)?
        \s*$",
    )
    .expect("function pattern is valid")
});

/// Identifier, quoted per dialect.
///
/// Dotted names are quoted segment by segment and `*` is left bare. Function
/// calls such as `COUNT(*)` pass through unquoted.
pub(super) struct Ident<S>(pub(super) S);

struct Segment<'a>(&'a str);

pub(super) fn is_function_call(name: &str) -> bool {
    FUNCTION_CALL.is_match(name)
}

fn split_alias(name: &str) -> Option<(&str, &str)> {
    let pos = name.to_ascii_lowercase().find(" as ")?;
    Some((name[..pos].trim(), name[pos + 4..].trim()))
}

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = self.0.as_ref().trim();

        if is_function_call(name) {
            f.dst.push_str(name);
        } else if let Some((expr, alias)) = split_alias(name) {
            fmt!(f, Ident(expr), " AS ", Segment(alias));
        } else {
            fmt!(f, Period(name.split('.').map(Segment)));
        }
    }
}

impl ToSql for Segment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.0 == "*" {
            f.dst.push('*');
            return;
        }

        let (open, close) = f.serializer.quotes();

        f.dst.push(open);
        for c in self.0.chars() {
            if c == close {
                f.dst.push(close);
            }
            f.dst.push(c);
        }
        f.dst.push(close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_function_calls() {
        assert!(is_function_call("COUNT(*)"));
        assert!(is_function_call("count(id) as total"));
        assert!(is_function_call("MAX(price) AS max_price"));
        assert!(is_function_call("COALESCE(nickname, name)"));
        assert!(is_function_call("ROW_NUMBER() OVER (ORDER BY id)"));
        assert!(!is_function_call("count"));
        assert!(!is_function_call("users.id"));
        assert!(!is_function_call("evil(); DROP TABLE users"));
        assert!(!is_function_call("MAX(id); DROP TABLE users; SELECT MIN(id)"));
    }
}
