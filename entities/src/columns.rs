//! Column definitions and per-type defaults.

#[cfg(test)]
#[path = "columns_test.rs"]
mod columns_test;

use serde_json::Value;

use crate::record::Record;

/// Host-supplied cell formatter.
pub type CellFormatter = fn(&Record) -> String;

#[derive(Clone, Copy, Debug, Default)]
pub enum CellRender {
    #[default]
    Text,
    /// Short status-like values rendered as a pill.
    Badge,
    /// Numeric amount with two decimals.
    Currency,
    /// Text produced by the host from the whole row.
    Custom(CellFormatter),
}

impl PartialEq for CellRender {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Self::Text, Self::Text) | (Self::Badge, Self::Badge) | (Self::Currency, Self::Currency) => true,
            _ => false,
        }
    }
}

impl Eq for CellRender {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub header: String,
    pub render: CellRender,
}

impl Column {
    #[must_use]
    pub fn new(key: &str, header: &str, render: CellRender) -> Self {
        Self { key: key.to_owned(), header: header.to_owned(), render }
    }

    #[must_use]
    pub fn text(key: &str, header: &str) -> Self {
        Self::new(key, header, CellRender::Text)
    }

    /// Column whose cells come from `format` rather than a single field.
    /// `key` only identifies the column.
    #[must_use]
    pub fn custom(key: &str, header: &str, format: CellFormatter) -> Self {
        Self::new(key, header, CellRender::Custom(format))
    }

    #[must_use]
    pub fn is_badge(&self) -> bool {
        matches!(self.render, CellRender::Badge)
    }

    /// Cell text for `record`. Missing values render empty.
    #[must_use]
    pub fn cell(&self, record: &Record) -> String {
        match self.render {
            CellRender::Text | CellRender::Badge => record.text(&self.key).unwrap_or_default(),
            CellRender::Currency => match record.get(&self.key) {
                Some(Value::Number(n)) => n.as_f64().map(|v| format!("${v:.2}")).unwrap_or_default(),
                Some(Value::String(s)) => s.parse::<f64>().map(|v| format!("${v:.2}")).unwrap_or_else(|_| s.clone()),
                _ => String::new(),
            },
            CellRender::Custom(format) => format(record),
        }
    }
}

/// Columns shown when a page mounts the table without its own set.
#[must_use]
pub fn default_columns(route_key: &str) -> Vec<Column> {
    use CellRender::{Badge, Currency};
    match route_key {
        "users" => vec![
            Column::text("name", "Name"),
            Column::text("email", "Email"),
            Column::text("mobile", "Mobile"),
            Column::text("country", "Country"),
            Column::new("type", "Role", Badge),
        ],
        "hotels" => vec![
            Column::text("name", "Name"),
            Column::new("type", "Type", Badge),
            Column::text("country", "Country"),
            Column::text("ownerName", "Owner"),
            Column::new("price", "Price / night", Currency),
        ],
        "tours" => vec![
            Column::text("name", "Name"),
            Column::text("country", "Country"),
            Column::text("duration", "Days"),
            Column::new("price", "Price", Currency),
        ],
        "vehicle" => vec![
            Column::text("name", "Name"),
            Column::new("vehicleType", "Type", Badge),
            Column::text("ownerName", "Owner"),
            Column::new("price", "Price / day", Currency),
        ],
        "restaurant" => vec![
            Column::text("name", "Name"),
            Column::new("type", "Cuisine", Badge),
            Column::text("country", "Country"),
            Column::text("mobile", "Phone"),
        ],
        _ => vec![Column::text("name", "Name"), Column::new("type", "Type", Badge)],
    }
}
