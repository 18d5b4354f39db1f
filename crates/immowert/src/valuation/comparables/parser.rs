use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::super::domain::ComparableSale;
use super::ComparableImportError;

pub(crate) fn parse_sales<R: Read>(
    reader: R,
) -> Result<Vec<ComparableSale>, ComparableImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut sales = Vec::new();

    for (position, record) in csv_reader.deserialize::<SaleRow>().enumerate() {
        let row = record?;
        let sale_date = parse_date(&row.sale_date).ok_or_else(|| ComparableImportError::Row {
            row: position + 1,
            message: format!("'{}' is not a valid YYYY-MM-DD sale date", row.sale_date),
        })?;

        let mut adjustments = BTreeMap::new();
        if let Some(factor) = row.location_factor {
            adjustments.insert("location".to_string(), factor);
        }
        if let Some(factor) = row.condition_factor {
            adjustments.insert("condition".to_string(), factor);
        }

        sales.push(ComparableSale {
            sale_date,
            price: row.price,
            area: row.area,
            index_at_sale: row.index,
            adjustments,
        });
    }

    Ok(sales)
}

#[derive(Debug, Deserialize)]
struct SaleRow {
    #[serde(rename = "Sale Date")]
    sale_date: String,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Area")]
    area: f64,
    #[serde(rename = "Index", default, deserialize_with = "empty_as_none")]
    index: Option<f64>,
    #[serde(
        rename = "Location Factor",
        default,
        deserialize_with = "empty_as_none"
    )]
    location_factor: Option<f64>,
    #[serde(
        rename = "Condition Factor",
        default,
        deserialize_with = "empty_as_none"
    )]
    condition_factor: Option<f64>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
