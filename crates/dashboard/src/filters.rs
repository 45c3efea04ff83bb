use models::price::parse_decimal;
use models::{OnSale, Price, Record};
use rust_decimal::Decimal;

use crate::columns::Column;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparator {
    fn holds(&self, left: Decimal, right: Decimal) -> bool {
        match self {
            Comparator::Lt => left < right,
            Comparator::Le => left <= right,
            Comparator::Gt => left > right,
            Comparator::Ge => left >= right,
            Comparator::Eq => left == right,
        }
    }
}

/// Price column filter: `>= 50`, `< 80`, `= 70`, or plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriceFilter {
    Compare(Comparator, Decimal),
    /// Substring of the displayed price.
    Contains(String),
}

impl PriceFilter {
    /// `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        // two-char operators first
        let ops = [
            (">=", Comparator::Ge),
            ("<=", Comparator::Le),
            (">", Comparator::Gt),
            ("<", Comparator::Lt),
            ("=", Comparator::Eq),
        ];
        for (prefix, cmp) in ops {
            if let Some(rest) = text.strip_prefix(prefix) {
                let operand = rest.trim().replace(',', ".");
                if let Ok(value) = parse_decimal(&operand) {
                    return Some(PriceFilter::Compare(cmp, value));
                }
                break;
            }
        }
        Some(PriceFilter::Contains(text.replace(',', ".").to_lowercase()))
    }

    pub fn matches(&self, price: Price) -> bool {
        match self {
            PriceFilter::Compare(cmp, value) => cmp.holds(price.as_decimal(), *value),
            PriceFilter::Contains(text) => price.to_string().contains(text.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnFilter {
    /// Passes when the column's displayed value equals any entry; empty passes all.
    OneOf(Vec<String>),
    /// Applies to the record's price.
    Price(PriceFilter),
    /// Applies to the record's availability flag.
    OnSale(OnSale),
}

impl ColumnFilter {
    pub fn matches(&self, column: Column, r: &Record) -> bool {
        match self {
            ColumnFilter::OneOf(values) => {
                values.is_empty() || {
                    let cell = column.display(r);
                    values.iter().any(|v| *v == cell)
                }
            }
            ColumnFilter::Price(f) => f.matches(r.price),
            ColumnFilter::OnSale(v) => r.on_sale == *v,
        }
    }
}

/// Lowercased haystack searched by the global filter.
pub fn search_text(r: &Record) -> String {
    let price = r.price.to_string();
    [
        r.location.as_str(),
        r.provider.as_str(),
        r.service_name.as_str(),
        r.company_service_name.as_str(),
        r.company_code.as_str(),
        r.on_sale.as_str(),
        price.as_str(),
        r.id.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Normalize raw global filter input; blank means no filter.
pub fn normalize_query(input: &str) -> String {
    input.trim().to_lowercase()
}

/// `query` must already be normalized.
pub fn matches_global(r: &Record, query: &str) -> bool {
    query.is_empty() || search_text(r).contains(query)
}
