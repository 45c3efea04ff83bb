#![cfg(test)]
use std::path::PathBuf;

use models::{OnSale, Price, Record};
use serde_json::Value;

fn record(id: &str, on_sale: OnSale, price: &str, location: &str, provider: &str, service: &str, code: &str) -> Record {
    Record {
        id: id.into(),
        on_sale,
        price: Price::parse_str(price).expect("valid price"),
        location: location.into(),
        provider: provider.into(),
        service_name: service.into(),
        company_code: code.into(),
        company_service_name: format!("{service} (azienda)"),
    }
}

pub fn sample_records() -> Vec<Record> {
    vec![
        record("W-001", OnSale::Yes, "70", "Roma Eur", "Dr. Bianchi", "Visita cardiologica", "CARD01"),
        record("W-002", OnSale::Yes, "45.5", "Milano Centro", "Dr.ssa Verdi", "Ecografia addome", "ECO02"),
        record("W-003", OnSale::No, "120", "Roma Prati", "Dr. Neri", "Risonanza magnetica", "RM03"),
        record("W-004", OnSale::Yes, "35", "Torino", "Dr. Rossi", "Prelievo", "LAB04"),
    ]
}

/// Write the sample records to a fresh temp file and return its path.
pub async fn seeded_store_path() -> Result<PathBuf, anyhow::Error> {
    store_path_with(&serde_json::to_value(sample_records())?).await
}

/// Write `rows` verbatim to a fresh temp file and return its path.
pub async fn store_path_with(rows: &Value) -> Result<PathBuf, anyhow::Error> {
    let path = std::env::temp_dir().join(format!("records_{}.json", uuid::Uuid::new_v4()));
    let mut data = serde_json::to_vec_pretty(rows)?;
    data.push(b'\n');
    tokio::fs::write(&path, data).await?;
    Ok(path)
}
