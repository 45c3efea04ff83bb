use models::price::{parse_decimal, round_price, PRICE_SCALE};
use models::{OnSale, Price, Record, RecordPatch};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::client::RecordUpdater;
use crate::table::RecordsTable;

/// Upper bound accepted by the price cell.
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

pub const SAVE_FAILED: &str = "Error while saving.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceInputError {
    #[error("Enter a number.")]
    NotANumber,
    #[error("Price cannot be negative.")]
    Negative,
    #[error("Price looks too high.")]
    TooHigh,
    #[error("Max 2 decimals.")]
    TooManyDecimals,
}

/// Trim and accept `,` as the decimal separator; `None` when not a number.
pub fn normalize_price_input(value: &str) -> Option<Decimal> {
    let cleaned = value.trim().replacen(',', ".", 1);
    if cleaned.is_empty() {
        return None;
    }
    parse_decimal(&cleaned).ok()
}

pub fn validate_price(n: Decimal) -> Result<(), PriceInputError> {
    if n < Decimal::ZERO {
        return Err(PriceInputError::Negative);
    }
    if n > MAX_PRICE {
        return Err(PriceInputError::TooHigh);
    }
    if n.normalize().scale() > PRICE_SCALE {
        return Err(PriceInputError::TooManyDecimals);
    }
    Ok(())
}

/// Result of committing a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Nothing to send.
    Unchanged,
    /// Server accepted the change; carries its copy of the record.
    Saved(Record),
    /// Rejected locally; the server was not called.
    Rejected(PriceInputError),
    /// The save failed and the row was rolled back.
    Failed(String),
}

/// Editable price cell with a text draft.
#[derive(Debug, Clone)]
pub struct PriceCell {
    record_id: String,
    committed: Price,
    draft: String,
    error: Option<String>,
    saving: bool,
}

impl PriceCell {
    pub fn new(record: &Record) -> Self {
        Self {
            record_id: record.id.clone(),
            committed: record.price,
            draft: record.price.to_string(),
            error: None,
            saving: false,
        }
    }

    pub fn draft(&self) -> &str { &self.draft }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
    pub fn is_saving(&self) -> bool { self.saving }
    pub fn committed(&self) -> Price { self.committed }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Escape: drop the draft and the error.
    pub fn cancel(&mut self) {
        self.error = None;
        self.draft = self.committed.to_string();
    }

    /// The row changed outside this cell.
    pub fn sync(&mut self, record: &Record) {
        self.committed = record.price;
        self.draft = record.price.to_string();
    }

    fn reject(&mut self, e: PriceInputError) -> CommitOutcome {
        self.error = Some(e.to_string());
        self.draft = self.committed.to_string();
        CommitOutcome::Rejected(e)
    }

    /// Blur / Enter.
    pub async fn commit(&mut self, table: &mut RecordsTable, updater: &dyn RecordUpdater) -> CommitOutcome {
        self.error = None;

        let parsed = match normalize_price_input(&self.draft) {
            Some(n) => n,
            None => return self.reject(PriceInputError::NotANumber),
        };
        let rounded = round_price(parsed);
        if let Err(e) = validate_price(rounded) {
            return self.reject(e);
        }
        let price = match Price::new(rounded) {
            Ok(p) => p,
            Err(_) => return self.reject(PriceInputError::Negative),
        };
        if price == self.committed {
            self.draft = self.committed.to_string();
            return CommitOutcome::Unchanged;
        }

        self.saving = true;
        let res = table.commit_patch(&self.record_id, RecordPatch::price(price), updater).await;
        self.saving = false;

        match res {
            Ok(saved) => {
                self.sync(&saved);
                CommitOutcome::Saved(saved)
            }
            Err(e) => {
                self.error = Some(SAVE_FAILED.to_string());
                self.draft = self.committed.to_string();
                CommitOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Editable availability cell (select with `SI` / `NO`).
#[derive(Debug, Clone)]
pub struct OnSaleCell {
    record_id: String,
    committed: OnSale,
    value: OnSale,
    saving: bool,
}

impl OnSaleCell {
    pub fn new(record: &Record) -> Self {
        Self { record_id: record.id.clone(), committed: record.on_sale, value: record.on_sale, saving: false }
    }

    pub fn value(&self) -> OnSale { self.value }
    pub fn is_saving(&self) -> bool { self.saving }

    pub fn sync(&mut self, record: &Record) {
        self.committed = record.on_sale;
        self.value = record.on_sale;
    }

    pub async fn select(&mut self, next: OnSale, table: &mut RecordsTable, updater: &dyn RecordUpdater) -> CommitOutcome {
        if next == self.committed {
            return CommitOutcome::Unchanged;
        }
        self.value = next;
        self.saving = true;
        let res = table.commit_patch(&self.record_id, RecordPatch::on_sale(next), updater).await;
        self.saving = false;

        match res {
            Ok(saved) => {
                self.sync(&saved);
                CommitOutcome::Saved(saved)
            }
            Err(e) => {
                self.value = self.committed;
                CommitOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use crate::table::tests::sample;
    use async_trait::async_trait;
    use std::str::FromStr;
    use std::sync::Mutex;

    /// Applies patches to its own copy of the rows, like the server would.
    struct FakeServer {
        rows: Mutex<Vec<Record>>,
        fail: bool,
        calls: Mutex<Vec<(String, RecordPatch)>>,
    }

    impl FakeServer {
        fn new(fail: bool) -> Self {
            Self { rows: Mutex::new(sample()), fail, calls: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RecordUpdater for FakeServer {
        async fn patch(&self, id: &str, patch: &RecordPatch) -> Result<Record, ClientError> {
            self.calls.lock().unwrap().push((id.to_string(), *patch));
            if self.fail {
                return Err(ClientError::Status { status: 500, body: "boom".into() });
            }
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| ClientError::Status { status: 404, body: "Not found".into() })?;
            row.apply(patch);
            Ok(row.clone())
        }
    }

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn normalize_accepts_comma_and_whitespace() {
        assert_eq!(normalize_price_input(" 70,5 "), Some(d("70.5")));
        assert_eq!(normalize_price_input("70"), Some(d("70")));
        assert_eq!(normalize_price_input(""), None);
        assert_eq!(normalize_price_input("abc"), None);
        assert_eq!(normalize_price_input("1,2,3"), None);
    }

    #[test]
    fn validate_bounds_and_scale() {
        assert_eq!(validate_price(d("-1")), Err(PriceInputError::Negative));
        assert_eq!(validate_price(d("100000.01")), Err(PriceInputError::TooHigh));
        assert_eq!(validate_price(d("100000")), Ok(()));
        assert_eq!(validate_price(d("10.005")), Err(PriceInputError::TooManyDecimals));
        assert_eq!(validate_price(d("10.500")), Ok(()));
    }

    #[tokio::test]
    async fn price_commit_saves_and_reconciles() {
        let server = FakeServer::new(false);
        let mut table = RecordsTable::new(sample());
        let mut cell = PriceCell::new(table.row("W-1").unwrap());

        cell.edit("80,005");
        let out = cell.commit(&mut table, &server).await;
        let CommitOutcome::Saved(saved) = &out else { panic!("expected save, got {out:?}") };
        assert_eq!(saved.price.to_string(), "80.01");
        assert_eq!(table.row("W-1").unwrap().price.to_string(), "80.01");
        assert_eq!(cell.draft(), "80.01");
        assert!(cell.error().is_none());
        assert!(!cell.is_saving());
        assert_eq!(server.calls(), 1);
    }

    #[tokio::test]
    async fn price_commit_rolls_back_on_failure() {
        let server = FakeServer::new(true);
        let mut table = RecordsTable::new(sample());
        let before = table.row("W-2").unwrap().clone();
        let mut cell = PriceCell::new(&before);

        cell.edit("99");
        let out = cell.commit(&mut table, &server).await;
        assert!(matches!(out, CommitOutcome::Failed(_)));
        assert_eq!(table.row("W-2").unwrap(), &before);
        assert_eq!(cell.draft(), "45.5");
        assert_eq!(cell.error(), Some(SAVE_FAILED));
        assert_eq!(server.calls(), 1);
    }

    #[tokio::test]
    async fn price_commit_local_rejections_skip_the_server() {
        let server = FakeServer::new(false);
        let mut table = RecordsTable::new(sample());
        let mut cell = PriceCell::new(table.row("W-1").unwrap());

        cell.edit("");
        assert_eq!(cell.commit(&mut table, &server).await, CommitOutcome::Rejected(PriceInputError::NotANumber));
        assert_eq!(cell.draft(), "70");
        assert_eq!(cell.error(), Some("Enter a number."));

        cell.edit("-3");
        assert_eq!(cell.commit(&mut table, &server).await, CommitOutcome::Rejected(PriceInputError::Negative));

        cell.edit("250000");
        assert_eq!(cell.commit(&mut table, &server).await, CommitOutcome::Rejected(PriceInputError::TooHigh));

        cell.edit("70.001");
        assert_eq!(cell.commit(&mut table, &server).await, CommitOutcome::Unchanged);
        assert!(cell.error().is_none());

        assert_eq!(server.calls(), 0);
    }

    #[tokio::test]
    async fn cancel_restores_draft_and_clears_error() {
        let server = FakeServer::new(false);
        let mut table = RecordsTable::new(sample());
        let mut cell = PriceCell::new(table.row("W-4").unwrap());
        cell.edit("x");
        cell.commit(&mut table, &server).await;
        assert!(cell.error().is_some());
        cell.edit("12");
        cell.cancel();
        assert_eq!(cell.draft(), "35");
        assert!(cell.error().is_none());
    }

    #[tokio::test]
    async fn on_sale_select_saves_or_rolls_back() {
        let ok = FakeServer::new(false);
        let mut table = RecordsTable::new(sample());
        let mut cell = OnSaleCell::new(table.row("W-1").unwrap());

        assert_eq!(cell.select(OnSale::Yes, &mut table, &ok).await, CommitOutcome::Unchanged);
        assert_eq!(ok.calls(), 0);

        assert!(matches!(cell.select(OnSale::No, &mut table, &ok).await, CommitOutcome::Saved(_)));
        assert_eq!(cell.value(), OnSale::No);
        assert_eq!(table.row("W-1").unwrap().on_sale, OnSale::No);

        let failing = FakeServer::new(true);
        assert!(matches!(cell.select(OnSale::Yes, &mut table, &failing).await, CommitOutcome::Failed(_)));
        assert_eq!(cell.value(), OnSale::No);
        assert_eq!(table.row("W-1").unwrap().on_sale, OnSale::No);
    }

    #[tokio::test]
    async fn unknown_row_fails_without_calling_server() {
        let server = FakeServer::new(false);
        let mut table = RecordsTable::new(Vec::new());
        let mut cell = PriceCell::new(&sample()[0]);
        cell.edit("10");
        assert!(matches!(cell.commit(&mut table, &server).await, CommitOutcome::Failed(_)));
        assert_eq!(server.calls(), 0);
    }
}
