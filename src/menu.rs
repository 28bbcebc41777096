//! Spreadsheet-backed menu: one sheet per category, rows of `[name, image]`.

use crate::catalog::{Catalog, Product};
use crate::config::MenuSource;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SHEET_RANGE: &str = "A1:B40";

#[derive(Debug, Deserialize)]
struct SheetValues {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

fn sheet_url(source: &MenuSource, category: &str) -> String {
    format!(
        "{SHEETS_API}/{}/values/{category}!{SHEET_RANGE}",
        source.sheet_id
    )
}

fn rows_to_products(rows: Vec<Vec<String>>) -> Vec<Product> {
    rows.into_iter()
        .filter_map(|row| {
            let mut cells = row.into_iter();
            let name = cells.next().filter(|name| !name.trim().is_empty())?;
            let image = cells.next().unwrap_or_default();
            Some(Product::new(&name, &name, &image))
        })
        .collect()
}

async fn fetch_category(
    client: &Client,
    source: &MenuSource,
    category: &str,
) -> Result<Vec<Product>, reqwest::Error> {
    let sheet: SheetValues = client
        .get(sheet_url(source, category))
        .query(&[("key", source.api_key.as_str())])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(rows_to_products(sheet.values))
}

/// Loads every category from the spreadsheet once. A category whose sheet
/// cannot be fetched keeps `products: None`; there is no retry.
pub async fn fetch_menu(client: &Client, source: &MenuSource) -> Catalog {
    let mut categories = Catalog::category_shells();
    for category in categories.iter_mut() {
        match fetch_category(client, source, &category.name).await {
            Ok(products) => {
                info!(category = %category.name, count = products.len(), "menu category loaded");
                category.products = Some(products);
            }
            Err(err) => error!(category = %category.name, "failed to fetch menu category: {err}"),
        }
    }
    Catalog { categories }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_products_and_blank_rows_are_dropped() {
        let rows = vec![
            vec!["Hamburger".to_string(), "https://img/hamburger.png".to_string()],
            vec!["".to_string()],
            vec![],
            vec!["Cola".to_string()],
        ];
        let products = rows_to_products(rows);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Hamburger");
        assert_eq!(products[0].system_name, "Hamburger");
        assert_eq!(products[0].image_path, "https://img/hamburger.png");
        assert_eq!(products[1].image_path, "");
    }

    #[test]
    fn sheet_response_without_values_is_empty() {
        let sheet: SheetValues = serde_json::from_str(r#"{"range":"Drinks!A1:B40"}"#).unwrap();
        assert!(sheet.values.is_empty());
    }

    #[test]
    fn url_targets_category_range() {
        let source = MenuSource {
            sheet_id: "sheet123".to_string(),
            api_key: "key".to_string(),
        };
        assert_eq!(
            sheet_url(&source, "Drinks"),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet123/values/Drinks!A1:B40"
        );
    }
}
