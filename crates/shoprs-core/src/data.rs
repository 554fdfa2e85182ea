//! CSV data loading.
//!
//! The three demo data sources (users, products, purchase history) are
//! plain CSV files with a header row. Parsing is an explicit
//! parse-and-validate step that fails closed: a row with a missing
//! required field or an unparseable price is skipped and logged rather
//! than silently coerced.

use crate::models::{Product, PurchaseRecord, User};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// Errors raised while loading a data source.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

fn build_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn column(headers: &StringRecord, name: &'static str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(DataError::MissingColumn(name))
}

fn optional_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).map(str::trim).filter(|s| !s.is_empty())
}

fn optional_field(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| field(record, i))
        .map(|s| s.to_string())
}

/// Parse users from CSV. Rows missing any field are skipped.
pub fn read_users<R: Read>(reader: R) -> Result<Vec<User>, DataError> {
    let mut csv = build_reader(reader);
    let headers = csv.headers()?.clone();
    let id = column(&headers, "UserID")?;
    let username = column(&headers, "Username")?;
    let password = column(&headers, "Password")?;

    let mut users = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in csv.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("users row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };
        match (field(&record, id), field(&record, username), field(&record, password)) {
            (Some(user_id), Some(username), Some(password)) => users.push(User {
                user_id: user_id.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => {
                tracing::warn!("users row {}: missing required field, skipped", line + 2);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        tracing::warn!("skipped {} malformed user rows", skipped);
    }
    Ok(users)
}

/// Parse products from CSV.
///
/// `ProductID`, `ProductName`, `Category` and `Price` are required; a row
/// whose price does not parse as a number is skipped. `ImageURL` and the
/// attribute columns (`Size`, `Brand`, `Material`, `Color`) are optional.
pub fn read_products<R: Read>(reader: R) -> Result<Vec<Product>, DataError> {
    let mut csv = build_reader(reader);
    let headers = csv.headers()?.clone();
    let id = column(&headers, "ProductID")?;
    let name = column(&headers, "ProductName")?;
    let category = column(&headers, "Category")?;
    let price = column(&headers, "Price")?;
    let image = optional_column(&headers, "ImageURL");
    let size = optional_column(&headers, "Size");
    let brand = optional_column(&headers, "Brand");
    let material = optional_column(&headers, "Material");
    let color = optional_column(&headers, "Color");

    let mut products = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in csv.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("products row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };
        let parsed = (
            field(&record, id),
            field(&record, name),
            field(&record, category),
            field(&record, price).and_then(|p| p.parse::<f64>().ok()),
        );
        match parsed {
            (Some(id), Some(name), Some(category), Some(price)) => products.push(Product {
                id: id.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                price,
                image: optional_field(&record, image).unwrap_or_default(),
                size: optional_field(&record, size),
                brand: optional_field(&record, brand),
                material: optional_field(&record, material),
                color: optional_field(&record, color),
            }),
            _ => {
                tracing::warn!("products row {}: missing or invalid field, skipped", line + 2);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        tracing::warn!("skipped {} malformed product rows", skipped);
    }
    Ok(products)
}

/// Parse purchase history from CSV. Rows missing either id are skipped.
pub fn read_purchase_history<R: Read>(reader: R) -> Result<Vec<PurchaseRecord>, DataError> {
    let mut csv = build_reader(reader);
    let headers = csv.headers()?.clone();
    let user_id = column(&headers, "UserID")?;
    let product_id = column(&headers, "ProductID")?;

    let mut history = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in csv.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("purchase history row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };
        match (field(&record, user_id), field(&record, product_id)) {
            (Some(user_id), Some(product_id)) => history.push(PurchaseRecord {
                user_id: user_id.to_string(),
                product_id: product_id.to_string(),
            }),
            _ => {
                tracing::warn!("purchase history row {}: missing id, skipped", line + 2);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        tracing::warn!("skipped {} malformed purchase rows", skipped);
    }
    Ok(history)
}

fn open(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load users from `users.csv` under the data directory.
pub fn load_users(data_dir: &Path) -> Result<Vec<User>, DataError> {
    read_users(open(&data_dir.join("users.csv"))?)
}

/// Load products from `products.csv` under the data directory.
pub fn load_products(data_dir: &Path) -> Result<Vec<Product>, DataError> {
    read_products(open(&data_dir.join("products.csv"))?)
}

/// Load purchase history from `purchase_history.csv` under the data directory.
pub fn load_purchase_history(data_dir: &Path) -> Result<Vec<PurchaseRecord>, DataError> {
    read_purchase_history(open(&data_dir.join("purchase_history.csv"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_are_trimmed() {
        let csv = "UserID,Username,Password\n 1 , alice , secret \n";
        let users = read_users(csv.as_bytes()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_id, "1");
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].password, "secret");
    }

    #[test]
    fn user_rows_missing_fields_are_skipped() {
        let csv = "UserID,Username,Password\n1,alice,secret\n2,,nopass\n3,carol,pw\n";
        let users = read_users(csv.as_bytes()).unwrap();
        assert_eq!(
            users.iter().map(|u| u.user_id.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
    }

    #[test]
    fn missing_header_is_an_error() {
        let csv = "UserID,Username\n1,alice\n";
        assert!(matches!(
            read_users(csv.as_bytes()),
            Err(DataError::MissingColumn("Password"))
        ));
    }

    #[test]
    fn products_parse_price_and_optional_columns() {
        let csv = "ProductID,ProductName,Category,Price,ImageURL,Color\n\
                   10,Runner,Shoes,2499.5,http://img/10.png,Red\n\
                   11,Hoodie,Apparel,999,,\n";
        let products = read_products(csv.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, 2499.5);
        assert_eq!(products[0].color.as_deref(), Some("Red"));
        assert_eq!(products[1].image, "");
        assert_eq!(products[1].color, None);
        assert_eq!(products[1].size, None);
    }

    #[test]
    fn products_with_bad_price_are_skipped() {
        let csv = "ProductID,ProductName,Category,Price,ImageURL\n\
                   10,Runner,Shoes,not-a-number,\n\
                   11,Hoodie,Apparel,999,\n";
        let products = read_products(csv.as_bytes()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "11");
    }

    #[test]
    fn purchase_history_joins_users_to_products() {
        let csv = "UserID,ProductID\n1,10\n1,11\n2,10\n";
        let history = read_purchase_history(csv.as_bytes()).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].user_id, "2");
    }

    #[test]
    fn load_from_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_users(dir.path()),
            Err(DataError::Io { .. })
        ));
    }
}
