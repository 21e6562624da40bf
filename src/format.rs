//! Locale-aware number formatting for reports

use std::fmt;
use std::str::FromStr;

use crate::error::{FeasibilityError, Result};

/// Report language; Arabic output is right-to-left with Arabic-Indic digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }

    fn group_separator(self) -> char {
        match self {
            Locale::En => ',',
            Locale::Ar => '\u{066C}',
        }
    }

    fn percent_sign(self) -> char {
        match self {
            Locale::En => '%',
            Locale::Ar => '\u{066A}',
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Ar => f.write_str("ar"),
        }
    }
}

impl FromStr for Locale {
    type Err = FeasibilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ar" | "arabic" => Ok(Locale::Ar),
            other => Err(FeasibilityError::InvalidSelection(format!(
                "unknown language '{}' (expected en or ar)",
                other
            ))),
        }
    }
}

/// Map ASCII digits to Arabic-Indic digits (U+0660..U+0669)
pub fn to_arabic_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Map Arabic-Indic and Eastern Arabic-Indic digits back to ASCII
pub fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x0660..=0x0669 => char::from_u32('0' as u32 + (c as u32 - 0x0660)).unwrap_or(c),
            0x06F0..=0x06F9 => char::from_u32('0' as u32 + (c as u32 - 0x06F0)).unwrap_or(c),
            _ => c,
        })
        .collect()
}

fn localize_digits(text: String, locale: Locale) -> String {
    match locale {
        Locale::En => text,
        Locale::Ar => to_arabic_digits(&text),
    }
}

/// Round half away from zero and group thousands
fn group_whole(value: f64, separator: char) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole number with localized grouping and digits, no currency marker
pub fn format_number(value: f64, locale: Locale) -> String {
    localize_digits(group_whole(value, locale.group_separator()), locale)
}

/// `SAR 1,234` in English, `١٬٢٣٤ ريال` in Arabic
pub fn format_money(value: f64, locale: Locale) -> String {
    let amount = format_number(value, locale);
    match locale {
        Locale::En => format!("SAR {}", amount),
        Locale::Ar => format!("{} ريال", amount),
    }
}

/// Whole-percent rendering of a rate in [0, 1]
pub fn format_percent(rate: f64, locale: Locale) -> String {
    format_whole_percent((rate * 100.0).round() as i64, locale)
}

pub fn format_whole_percent(percent: i64, locale: Locale) -> String {
    localize_digits(format!("{}{}", percent, locale.percent_sign()), locale)
}

pub fn format_count(count: u32, locale: Locale) -> String {
    localize_digits(count.to_string(), locale)
}
