use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{Basket, CardData, Product};

/// Enough fractional digits to print any f64 exactly.
const EXACT_DIGITS: usize = 1100;

/// Fixed-point text with `digits` decimals.
///
/// Rounds half-up on the exact binary value, so `0.125` becomes `0.13` and
/// `1.005` (stored just below) becomes `1.00`. Non-finite values are spelled
/// `NaN`, `Infinity` and `-Infinity`; magnitudes from `1e21` up fall back to
/// [`js_number`].
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return js_number(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part.bytes().collect();
    kept.extend(frac_part.bytes().take(digits));
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|&d| d >= b'5');

    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let int_digits = String::from_utf8_lossy(&kept[..split]);
    if digits == 0 {
        return format!("{}{}", sign, int_digits);
    }
    let frac_digits = String::from_utf8_lossy(&kept[split..]);
    format!("{}{}.{}", sign, int_digits, frac_digits)
}

/// Money text: exactly two decimals.
pub fn to_fixed_2(value: f64) -> String {
    to_fixed(value, 2)
}

/// Shortest text for a number, as a page would print it.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

pub fn format_catalog_table(cards: &[CardData], currency: &str) -> String {
    if cards.is_empty() {
        return String::new();
    }

    let rows: Vec<CatalogTableRow> = cards
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let product = Product::from_card(card);
            CatalogTableRow {
                index,
                id: product.id.key(),
                name: product.display_name().to_string(),
                price: format!("{}{}", currency, js_number(product.price)),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

#[derive(Tabled)]
struct BasketTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    count: u64,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Total")]
    total: String,
}

pub fn format_basket_table(basket: &Basket, currency: &str) -> String {
    if basket.is_empty() {
        return String::new();
    }

    let rows: Vec<BasketTableRow> = basket
        .items()
        .map(|item| BasketTableRow {
            id: item.id.key(),
            name: if item.display_name().chars().count() > 30 {
                format!("{}...", item.display_name().chars().take(27).collect::<String>())
            } else {
                item.display_name().to_string()
            },
            count: item.count,
            price: format!("{}{}", currency, js_number(item.price)),
            total: format!("{}{}", currency, to_fixed_2(item.line_total())),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

/// One-line header summary: the icon badge and the basket total.
pub fn format_basket_summary(count_text: &str, total_text: &str, currency: &str, hidden: bool) -> String {
    let visibility = if hidden {
        style("hidden").dim()
    } else {
        style("open").green()
    };
    format!(
        "{}: {}  {}: {}{}  [{}]",
        style("Items").bold(),
        style(count_text).cyan(),
        style("Total").bold(),
        currency,
        style(total_text).yellow(),
        visibility
    )
}
