use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use models::Record;

/// How a column is filtered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Multi-select over distinct values.
    Categorical,
    /// Exact match on `SI` / `NO`.
    Availability,
    /// Comparator or free text.
    Price,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Location,
    Provider,
    ServiceName,
    CompanyCode,
    CompanyServiceName,
    OnSale,
    Price,
}

impl Column {
    /// Display order of the table.
    pub const ALL: [Column; 7] = [
        Column::Location,
        Column::Provider,
        Column::ServiceName,
        Column::CompanyCode,
        Column::CompanyServiceName,
        Column::OnSale,
        Column::Price,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Column::Location => "location",
            Column::Provider => "provider",
            Column::ServiceName => "service_name",
            Column::CompanyCode => "company_code",
            Column::CompanyServiceName => "company_service_name",
            Column::OnSale => "on_sale",
            Column::Price => "price",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Location => "Location",
            Column::Provider => "Provider",
            Column::ServiceName => "Service",
            Column::CompanyCode => "Code",
            Column::CompanyServiceName => "Service (company)",
            Column::OnSale => "On sale",
            Column::Price => "Price",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::OnSale => ColumnKind::Availability,
            Column::Price => ColumnKind::Price,
            _ => ColumnKind::Categorical,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Column::OnSale | Column::Price)
    }

    /// Cell text as shown in the table.
    pub fn display(&self, r: &Record) -> String {
        match self {
            Column::Location => r.location.clone(),
            Column::Provider => r.provider.clone(),
            Column::ServiceName => r.service_name.clone(),
            Column::CompanyCode => r.company_code.clone(),
            Column::CompanyServiceName => r.company_service_name.clone(),
            Column::OnSale => r.on_sale.to_string(),
            Column::Price => r.price.to_string(),
        }
    }

    /// Price compares numerically, everything else in natural order.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            Column::Price => a.price.cmp(&b.price),
            _ => natural_cmp(&self.display(a), &self.display(b)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: Column) -> Self { Self { column, direction: SortDirection::Asc } }
    pub fn desc(column: Column) -> Self { Self { column, direction: SortDirection::Desc } }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = self.column.compare(a, b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Case-insensitive ordering where digit runs compare by numeric value,
/// so `"Sala 2"` sorts before `"Sala 10"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let da = take_digits(&mut ai);
                let db = take_digits(&mut bi);
                let ord = cmp_digit_runs(&da, &db);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                ai.next();
                bi.next();
            }
        }
    }
    a.cmp(b)
}

fn take_digits(it: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = it.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        it.next();
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_cmp_orders_digit_runs_numerically() {
        let mut v = vec!["Sala 10", "sala 2", "Sala 1", "Ambulatorio"];
        v.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(v, vec!["Ambulatorio", "Sala 1", "sala 2", "Sala 10"]);
    }

    #[test]
    fn natural_cmp_is_case_insensitive_with_stable_tie_break() {
        assert_eq!(natural_cmp("roma", "ROMA"), "roma".cmp("ROMA"));
        assert_eq!(natural_cmp("Roma", "rome"), Ordering::Less);
        assert_eq!(natural_cmp("CARD01", "CARD1"), "CARD01".cmp("CARD1"));
        assert_eq!(natural_cmp("abc", "abcd"), Ordering::Less);
    }

    #[test]
    fn editable_columns_are_price_and_on_sale() {
        let editable: Vec<_> = Column::ALL.iter().filter(|c| c.is_editable()).collect();
        assert_eq!(editable, vec![&Column::OnSale, &Column::Price]);
        assert_eq!(Column::Price.kind(), ColumnKind::Price);
        assert_eq!(Column::Location.kind(), ColumnKind::Categorical);
    }
}
