//! CSV-backed transaction store.
//!
//! Columns: id,date,description,amount,type,category (category may be blank)

use crate::error::StoreError;
use evolve_core::Transaction;
use std::io::Write;
use std::path::Path;

/// Read every transaction from a CSV file with a header row
pub fn read_transactions_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    let mut txns = Vec::new();
    for record in rdr.deserialize() {
        txns.push(record?);
    }
    Ok(txns)
}

/// Write transactions as CSV, header included
pub fn write_transactions_csv<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), StoreError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for txn in transactions {
        wtr.serialize(txn)?;
    }
    wtr.flush()?;
    Ok(())
}
