use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// How to format a numeric value for display on KPI tiles and chart axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Number { decimals: u8 },
    Integer,
}

impl ValueFormat {
    /// The dashboard's default currency format.
    pub fn usd() -> Self {
        ValueFormat::Money {
            currency: "$".to_string(),
        }
    }
}

/// Format `val` according to `fmt`, US conventions: currency prefix, comma
/// thousand separators, dot decimals. Amounts from one million up collapse
/// to "1.2M" so KPI tiles stay one line.
pub fn format_value(val: f64, fmt: &ValueFormat) -> String {
    match fmt {
        ValueFormat::Money { currency } => {
            let abs = val.abs();
            let sign = if val < 0.0 { "-" } else { "" };
            if abs >= 1_000_000.0 {
                format!("{}{}{:.1}M", sign, currency, abs / 1_000_000.0)
            } else {
                let int_part = abs.trunc() as i64;
                let frac = ((abs - abs.trunc()) * 100.0).round() as i64;
                // Carry when the fraction rounds up to a whole unit
                let (int_part, frac) = if frac >= 100 {
                    (int_part + 1, 0)
                } else {
                    (int_part, frac)
                };
                format!(
                    "{}{}{}.{:02}",
                    sign,
                    currency,
                    format_thousands(int_part),
                    frac
                )
            }
        }
        ValueFormat::Number { decimals } => {
            format!("{:.prec$}", val, prec = *decimals as usize)
        }
        ValueFormat::Integer => {
            let n = val.round() as i64;
            if n < 0 {
                format!("-{}", format_thousands(-n))
            } else {
                format_thousands(n)
            }
        }
    }
}

fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Compact axis-tick formatting: 1500 -> "1.5k", 2000000 -> "2M".
/// Trailing ".0" is dropped so common ticks stay short.
pub fn format_compact(val: f64) -> String {
    let abs = val.abs();
    let sign = if val < 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (abs / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (abs / 1_000.0, "k")
    } else {
        (abs, "")
    };
    let text = if (scaled - scaled.trunc()).abs() < 1e-9 {
        format!("{}", scaled.trunc() as i64)
    } else {
        format!("{:.1}", scaled)
    };
    format!("{}{}{}", sign, text, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        let usd = ValueFormat::usd();
        assert_eq!(format_value(7.5, &usd), "$7.50");
        assert_eq!(format_value(1234.56, &usd), "$1,234.56");
        assert_eq!(format_value(0.0, &usd), "$0.00");
        assert_eq!(format_value(2_500_000.0, &usd), "$2.5M");
    }

    #[test]
    fn test_format_money_rounding_carry() {
        let usd = ValueFormat::usd();
        assert_eq!(format_value(9.999, &usd), "$10.00");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_value(1234.0, &ValueFormat::Integer), "1,234");
        assert_eq!(format_value(0.0, &ValueFormat::Integer), "0");
    }

    #[test]
    fn test_format_number_decimals() {
        assert_eq!(format_value(3.14159, &ValueFormat::Number { decimals: 2 }), "3.14");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(850.0), "850");
        assert_eq!(format_compact(1500.0), "1.5k");
        assert_eq!(format_compact(2_000_000.0), "2M");
    }
}
