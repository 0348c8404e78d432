//! Форматирование значений для таблиц (локаль ru-RU)

use chrono::NaiveDate;

/// Заглушка для пустых ячеек
pub const EMPTY_CELL: &str = "-";

const NBSP: char = '\u{a0}';

/// `2024-03-15` (или `2024-03-15T10:00:00`) → `15.03.2024`
pub fn format_date(value: Option<&str>) -> String {
    let raw = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return EMPTY_CELL.to_string(),
    };
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%d.%m.%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `1234567.5` → `1 234 567,50 ₽`
pub fn format_currency(amount: Option<f64>) -> String {
    match amount {
        Some(a) if a.is_finite() => format!("{}{}₽", format_decimal(a, 2), NBSP),
        _ => EMPTY_CELL.to_string(),
    }
}

/// `5` → `5 %`, `2.5` → `2,5 %`
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let text = format_decimal(v, 2);
            let text = match text.split_once(',') {
                Some((int, frac)) => {
                    let frac = frac.trim_end_matches('0');
                    if frac.is_empty() {
                        int.to_string()
                    } else {
                        format!("{},{}", int, frac)
                    }
                }
                None => text,
            };
            format!("{}{}%", text, NBSP)
        }
        _ => EMPTY_CELL.to_string(),
    }
}

/// Текстовое поле или `-`
pub fn text_or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

/// Разряды через неразрывный пробел, дробная часть через запятую
fn format_decimal(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(*ch);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{},{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
