//! Small helpers shared by the page forms.

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub fn input_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn input_event_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// Parses a numeric input. Blank or malformed text reads as `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Human label for a form field key reported by `missing_fields`.
pub fn field_label(key: &str) -> &str {
    match key {
        "businessType" => "Business type",
        "businessScale" => "Business scale",
        "state" => "State",
        "location" => "City / location",
        "currentSales" => "Current monthly sales",
        "destination" => "Destination",
        "items_count" => "Number of items",
        other => other,
    }
}

/// One line naming every missing field, or `None` when nothing is missing.
pub fn missing_message(missing: &[&str]) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    let labels: Vec<&str> = missing.iter().map(|k| field_label(k)).collect();
    Some(format!("Please fill in: {}", labels.join(", ")))
}

/// `₹1,23,456` style grouping used for rupee amounts.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let whole = amount.abs().round() as u64;
    let digits = whole.to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<String> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            groups.push(right.to_string());
            rest = left;
        }
        groups.push(rest.to_string());
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{}₹{}", if negative { "-" } else { "" }, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 250000 "), Some(250000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_missing_message() {
        assert_eq!(missing_message(&[]), None);
        assert_eq!(
            missing_message(&["state", "currentSales"]).unwrap(),
            "Please fill in: State, Current monthly sales"
        );
    }

    #[test]
    fn test_format_inr_groups_lakhs() {
        assert_eq!(format_inr(950.0), "₹950");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(123456.0), "₹1,23,456");
        assert_eq!(format_inr(12345678.4), "₹1,23,45,678");
        assert_eq!(format_inr(-5175.0), "-₹5,175");
    }
}
