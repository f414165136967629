use rust_decimal::Decimal;

/// Форматирует число с разделителями тысяч (точками): 1234567 -> "1.234.567"
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Форматирует денежную сумму для отображения: "1 234 567,89 ₽".
/// None трактуется как ноль и отдаётся как "0 ₽" (поведение исходного API).
/// Используется только на слое форматирования ответов; сами расчёты
/// ведутся в Decimal.
pub fn format_currency(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return "0 ₽".to_string();
    };

    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{}{},{} ₽", sign, int_grouped, frac_part)
}

/// "50%" для заданного процента аванса, пустая строка если он не задан
pub fn format_advance(advance_percentage: Option<Decimal>) -> String {
    match advance_percentage {
        Some(p) if !p.is_zero() => format!("{}%", p.normalize()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(None), "0 ₽");
        assert_eq!(format_currency(Some(dec("0"))), "0,00 ₽");
        assert_eq!(format_currency(Some(dec("42.5"))), "42,50 ₽");
        assert_eq!(format_currency(Some(dec("1234567.89"))), "1 234 567,89 ₽");
        assert_eq!(format_currency(Some(dec("2500000.00"))), "2 500 000,00 ₽");
    }

    #[test]
    fn test_format_currency_negative() {
        // Перерасход отображается со знаком, не обрезается
        assert_eq!(format_currency(Some(dec("-500.00"))), "-500,00 ₽");
        assert_eq!(
            format_currency(Some(dec("-1200000.5"))),
            "-1 200 000,50 ₽"
        );
    }

    #[test]
    fn test_format_advance() {
        assert_eq!(format_advance(None), "");
        assert_eq!(format_advance(Some(dec("0"))), "");
        assert_eq!(format_advance(Some(dec("50.00"))), "50%");
        assert_eq!(format_advance(Some(dec("12.5"))), "12.5%");
    }
}
