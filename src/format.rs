//! Price and axis label formatting.

use num_format::{Locale, ToFormattedString};

/// Text shown in the tooltip when a region has no price.
pub const NO_PRICE: &str = "N/A";

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// `"£"` followed by the rounded price with thousands separators, e.g. `£500,000`.
pub fn format_price(v: f64) -> String {
    let n = v.round() as i64;
    format!("£{}", n.to_formatted_string(&Locale::en))
}

/// Tooltip price text: formatted price or [`NO_PRICE`].
pub fn format_optional_price(v: Option<f64>) -> String {
    v.map(format_price).unwrap_or_else(|| NO_PRICE.to_string())
}

/// Two significant figures with an SI prefix: `450000 → "450k"`, `1e6 → "1.0M"`, `0 → "0.0"`.
pub fn format_si(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let a = v.abs();
    if a == 0.0 {
        return "0.0".to_string();
    }
    // Two significant digits as an integer 10..=99, ties rounded away from zero.
    let mut exp = a.log10().floor() as i32;
    let mut digits = (a / 10f64.powi(exp - 1)).round();
    if digits < 10.0 {
        exp -= 1;
        digits = (a / 10f64.powi(exp - 1)).round();
    }
    if digits >= 100.0 {
        exp += 1;
        digits = (digits / 10.0).round();
    }
    let group = exp.div_euclid(3).clamp(-8, 8);
    let shift = exp - group * 3;
    let decimals = (1 - shift).max(0) as usize;
    let scaled = digits * 10f64.powi(shift - 1);
    let sign = if v < 0.0 { "-" } else { "" };
    let prefix = SI_PREFIXES[(group + 8) as usize];
    format!("{sign}{scaled:.decimals$}{prefix}")
}

/// Legend tick label, e.g. `£450k`.
pub fn format_si_price(v: f64) -> String {
    format!("£{}", format_si(v))
}

/// Tooltip body: escaped region name, a line break, then the price text.
pub fn tooltip_html(name: &str, price: Option<f64>) -> String {
    format!("{}<br>{}", escape_html(name), format_optional_price(price))
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_grouped_in_thousands() {
        assert_eq!(format_price(500000.0), "£500,000");
        assert_eq!(format_price(1234567.4), "£1,234,567");
        assert_eq!(format_price(999.6), "£1,000");
        assert_eq!(format_price(0.0), "£0");
        assert_eq!(format_optional_price(None), "N/A");
    }

    #[test]
    fn si_matches_two_significant_figures() {
        assert_eq!(format_si(450000.0), "450k");
        assert_eq!(format_si(200000.0), "200k");
        assert_eq!(format_si(1000000.0), "1.0M");
        assert_eq!(format_si(1200000.0), "1.2M");
        assert_eq!(format_si(2000000.0), "2.0M");
        assert_eq!(format_si(50000.0), "50k");
        assert_eq!(format_si(999999.0), "1.0M");
        assert_eq!(format_si(125000.0), "130k");
        assert_eq!(format_si(1050000.0), "1.1M");
        assert_eq!(format_si(995.0), "1.0k");
        assert_eq!(format_si(7.5), "7.5");
        assert_eq!(format_si(0.0), "0.0");
        assert_eq!(format_si(-1500.0), "-1.5k");
        assert_eq!(format_si_price(550000.0), "£550k");
    }

    #[test]
    fn tooltip_escapes_names() {
        assert_eq!(tooltip_html("A", Some(300000.0)), "A<br>£300,000");
        assert_eq!(tooltip_html("B", None), "B<br>N/A");
        assert_eq!(tooltip_html("Tom & <Jerry>", None), "Tom &amp; &lt;Jerry&gt;<br>N/A");
    }
}
