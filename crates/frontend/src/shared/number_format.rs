//! Number formatting for prices, totals and quantities

/// Groups the integer part in thousands with `.` and uses `,` as the decimal
/// separator, the way receipts are printed in the stores.
///
/// ```
/// # use pos_frontend::shared::number_format::format_number;
/// assert_eq!(format_number(1234.5, 2), "1.234,50");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money with two decimals and a currency sign
pub fn format_money(value: f64) -> String {
    format!("$ {}", format_number(value, 2))
}

/// Quantity with up to three decimals, trailing zeros dropped
pub fn format_quantity(value: f64) -> String {
    let formatted = format_number(value, 3);
    match formatted.split_once(',') {
        Some((int, dec)) => {
            let dec = dec.trim_end_matches('0');
            if dec.is_empty() {
                int.to_string()
            } else {
                format!("{},{}", int, dec)
            }
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0, 2), "0,00");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1234567.891, 2), "1.234.567,89");
        assert_eq!(format_number(-1234.5, 1), "-1.234,5");
        assert_eq!(format_number(-0.001, 2), "0,00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(10.0), "$ 10,00");
        assert_eq!(format_money(2.5), "$ 2,50");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(0.5), "0,5");
        assert_eq!(format_quantity(1.125), "1,125");
        assert_eq!(format_quantity(1200.0), "1.200");
    }
}
