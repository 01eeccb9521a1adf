use crate::Error;

use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Conversion rule between a stored raw value and the value the caller sees.
///
/// Declared by name (`"int"`, `"float:2"`, `"json"`, ...). Names outside the
/// built-in set refer to a handler registered on the
/// [`CastRegistry`](crate::CastRegistry) and are resolved on first use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Cast {
    Int,
    Float { decimals: u32 },
    Datetime,
    Json,
    Custom(String),
}

impl Cast {
    /// Most decimals a `float:<n>` cast may declare. An `f64` carries no
    /// more significant fractional digits than this.
    pub const MAX_FLOAT_DECIMALS: u32 = 15;

    pub fn float(decimals: u32) -> Cast {
        Cast::Float { decimals }
    }

    pub fn custom(name: impl Into<String>) -> Cast {
        Cast::Custom(name.into())
    }
}

impl FromStr for Cast {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, param) = match s.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (s, None),
        };

        let cast = match name.to_ascii_lowercase().as_str() {
            "" => return Err(Error::configuration("cast name is empty")),
            "int" | "integer" => Cast::Int,
            "float" | "double" => {
                let decimals = match param {
                    Some(param) => param.parse().map_err(|_| {
                        Error::configuration(format!("invalid decimals in cast `{s}`"))
                    })?,
                    None => 0,
                };

                if decimals > Cast::MAX_FLOAT_DECIMALS {
                    return Err(Error::configuration(format!(
                        "cast `{s}` declares more than {} decimals",
                        Cast::MAX_FLOAT_DECIMALS
                    )));
                }

                Cast::Float { decimals }
            }
            "datetime" => Cast::Datetime,
            "json" | "array" | "object" => Cast::Json,
            _ => Cast::Custom(s.to_string()),
        };

        Ok(cast)
    }
}

impl TryFrom<String> for Cast {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cast::Int => f.write_str("int"),
            Cast::Float { decimals: 0 } => f.write_str("float"),
            Cast::Float { decimals } => write!(f, "float:{decimals}"),
            Cast::Datetime => f.write_str("datetime"),
            Cast::Json => f.write_str("json"),
            Cast::Custom(name) => f.write_str(name),
        }
    }
}
