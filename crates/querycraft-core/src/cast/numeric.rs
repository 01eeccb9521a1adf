use crate::stmt::Value;

use std::iter;

/// Coerces to `I64`; null and unparseable input become zero.
pub(super) fn decode_int(value: &Value) -> Value {
    Value::I64(to_i64(value))
}

/// Coerces to `F64`; null and unparseable input become zero.
pub(super) fn decode_float(value: &Value) -> Value {
    Value::F64(to_f64(value))
}

/// With `decimals > 0` the number is rendered as fixed-point text rounded
/// half away from zero. Otherwise the coerced float passes through.
pub(super) fn encode_float(value: &Value, decimals: u32) -> Value {
    let number = to_f64(value);

    if decimals == 0 {
        return Value::F64(number);
    }

    Value::String(format_fixed(number, decimals))
}

fn to_i64(value: &Value) -> i64 {
    match value {
        Value::I64(v) => *v,
        Value::Bool(v) => i64::from(*v),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .unwrap_or_else(|_| s.parse::<f64>().map(|v| v as i64).unwrap_or(0))
        }
        Value::Json(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|v| v as i64))
            .unwrap_or(0),
        value => to_f64(value) as i64,
    }
}

fn to_f64(value: &Value) -> f64 {
    match value {
        Value::F64(v) => *v,
        Value::I64(v) => *v as f64,
        Value::Bool(v) => f64::from(u8::from(*v)),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Json(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Half-up fixed-point formatting.
///
/// Rounds the shortest decimal text that round-trips to `number`, so `1.005`
/// rounds as written rather than as its binary approximation `1.00499...`.
fn format_fixed(number: f64, decimals: u32) -> String {
    let decimals = decimals as usize;

    if !number.is_finite() {
        return format!("{:.*}", decimals, 0.0);
    }

    let text = number.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(iter::repeat(b'0')).take(decimals))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        carry(&mut digits);
    }

    let int_len = digits.len() - decimals;
    let negative = number < 0.0 && digits.iter().any(|d| *d != 0);

    let mut out = String::with_capacity(digits.len() + 2);

    if negative {
        out.push('-');
    }

    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }

    out
}

/// Adds one unit in the last place of a decimal digit string.
fn carry(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }

    digits.insert(0, 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_rounds_half_up() {
        assert_eq!(format_fixed(19.9999, 2), "20.00");
        assert_eq!(format_fixed(0.1256789, 4), "0.1257");
        assert_eq!(format_fixed(1.005, 2), "1.01");
        assert_eq!(format_fixed(2.675, 2), "2.68");
        assert_eq!(format_fixed(-1.005, 2), "-1.01");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
        assert_eq!(format_fixed(9.995, 2), "10.00");
        assert_eq!(format_fixed(0.5, 3), "0.500");
    }

    #[test]
    fn float_keeps_large_magnitudes() {
        assert_eq!(format_fixed(12345678901234.5678, 2), "12345678901234.57");
        assert_eq!(format_fixed(123456789012.34567, 4), "123456789012.3457");
        assert_eq!(format_fixed(-98765432109876.5, 1), "-98765432109876.5");
        assert_eq!(format_fixed(1e20, 2), "100000000000000000000.00");
    }

    #[test]
    fn float_zero_decimals_passes_through() {
        assert_eq!(encode_float(&Value::F64(1.23456), 0), Value::F64(1.23456));
        assert_eq!(encode_float(&Value::I64(3), 0), Value::F64(3.0));
    }

    #[test]
    fn null_is_zero() {
        assert_eq!(decode_int(&Value::Null), Value::I64(0));
        assert_eq!(decode_float(&Value::Null), Value::F64(0.0));
        assert_eq!(encode_float(&Value::Null, 2), Value::String("0.00".into()));
    }

    #[test]
    fn strings_are_coerced() {
        assert_eq!(decode_int(&Value::from(" 42 ")), Value::I64(42));
        assert_eq!(decode_int(&Value::from("4.9")), Value::I64(4));
        assert_eq!(decode_int(&Value::from("abc")), Value::I64(0));
        assert_eq!(decode_float(&Value::from("2.5")), Value::F64(2.5));
    }
}
