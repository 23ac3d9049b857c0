//! Transaction and product catalog loading using Polars

use crate::cleaning::standardize_item;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Products loaded from a catalog CSV
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    /// Product identifiers, as written in the file
    pub ids: Vec<String>,
    /// Product display names, as written in the file
    pub names: Vec<String>,
}

impl ProductCatalog {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tokens a cleaned transaction may contain: standardized names and raw ids
    pub fn valid_tokens(&self) -> HashSet<String> {
        self.names
            .iter()
            .map(|name| standardize_item(name))
            .chain(self.ids.iter().cloned())
            .collect()
    }
}

/// Load raw transactions from a CSV file
///
/// # Arguments
/// * `file_path` - Path to the CSV file. Either an `items` column holding
///   comma-separated items, or one column per product (one-hot or item names)
///
/// # Returns
/// * One raw item list per row, not yet cleaned
pub fn load_transactions(file_path: &str) -> crate::Result<Vec<Vec<String>>> {
    let df = read_csv(file_path)?;
    let transactions = to_transaction_list(&df)?;
    debug!(
        rows = transactions.len(),
        columns = df.width(),
        "transactions loaded"
    );
    Ok(transactions)
}

/// Load a product catalog with `id` and `name` columns
///
/// Falls back to the first two columns when those names are absent.
pub fn load_catalog(file_path: &str) -> crate::Result<ProductCatalog> {
    let df = read_csv(file_path)?;
    if df.width() < 2 {
        anyhow::bail!("Product catalog must have at least two columns (id, name)");
    }

    let columns = df.get_columns();
    let id_column = find_column(&df, "id").unwrap_or(&columns[0]);
    let name_column = find_column(&df, "name").unwrap_or(&columns[1]);

    let ids = string_values(id_column)?;
    let names = string_values(name_column)?;
    Ok(ProductCatalog { ids, names })
}

/// Convert a loaded frame into raw transactions
pub fn to_transaction_list(df: &DataFrame) -> crate::Result<Vec<Vec<String>>> {
    if let Some(items_column) = find_column(df, "items") {
        let cells = items_column.as_materialized_series().cast(&DataType::String)?;
        let transactions = cells
            .str()?
            .into_iter()
            .map(|cell| {
                cell.unwrap_or("")
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        return Ok(transactions);
    }

    let mut transactions: Vec<Vec<String>> = vec![Vec::new(); df.height()];
    for column in df.get_columns() {
        let name = column.name().as_str();
        let series = column.as_materialized_series();
        match series.dtype() {
            DataType::String => {
                for (row, cell) in series.str()?.into_iter().enumerate() {
                    if let Some(value) = cell.map(str::trim).filter(|v| !v.is_empty()) {
                        transactions[row].push(value.to_string());
                    }
                }
            }
            DataType::Boolean => {
                for (row, cell) in series.bool()?.into_iter().enumerate() {
                    if cell == Some(true) {
                        transactions[row].push(name.to_string());
                    }
                }
            }
            _ => {
                let numeric = series.cast(&DataType::Float64)?;
                for (row, cell) in numeric.f64()?.into_iter().enumerate() {
                    if cell.is_some_and(|v| v != 0.0 && !v.is_nan()) {
                        transactions[row].push(name.to_string());
                    }
                }
            }
        }
    }

    Ok(transactions)
}

fn read_csv(file_path: &str) -> crate::Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(file_path.into()))?
        .finish()?;
    Ok(df)
}

/// Column whose name matches `wanted` case-insensitively
fn find_column<'a>(df: &'a DataFrame, wanted: &str) -> Option<&'a Column> {
    df.get_columns()
        .iter()
        .find(|column| column.name().as_str().eq_ignore_ascii_case(wanted))
}

fn string_values(column: &Column) -> crate::Result<Vec<String>> {
    let cells = column.as_materialized_series().cast(&DataType::String)?;
    let values = cells
        .str()?
        .into_iter()
        .map(|cell| cell.unwrap_or("").to_string())
        .collect();
    Ok(values)
}
