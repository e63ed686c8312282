use crate::core::queries::ClientRequestCount;
use crate::core::snapshot::SnapshotSummary;
use crate::domain::model::{RealEstateType, RequestType};
use crate::utils::error::{RealtyError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => f.write_str("table"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(RealtyError::UnknownVariant {
                kind: "output format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopClientRow {
    pub id: u32,
    pub full_name: String,
    pub phone: String,
    pub count: usize,
}

impl From<&ClientRequestCount<'_>> for TopClientRow {
    fn from(entry: &ClientRequestCount<'_>) -> Self {
        Self {
            id: entry.counterparty.id,
            full_name: entry.counterparty.full_name.clone(),
            phone: entry.counterparty.phone.clone(),
            count: entry.count,
        }
    }
}

/// Owned result of one query, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryReport {
    Sellers {
        from: NaiveDate,
        to: NaiveDate,
        sellers: Vec<String>,
    },
    TopClients {
        request_type: RequestType,
        limit: usize,
        clients: Vec<TopClientRow>,
    },
    CountsByType {
        counts: BTreeMap<RealEstateType, usize>,
        total: usize,
    },
    MinPrice {
        price: Decimal,
        clients: Vec<String>,
    },
    Seekers {
        estate_type: RealEstateType,
        clients: Vec<String>,
    },
    Summary(SnapshotSummary),
}

fn name_rows(names: &[String]) -> Vec<Vec<String>> {
    names.iter().map(|n| vec![n.clone()]).collect()
}

impl QueryReport {
    /// Column headers and string cells shared by the table and CSV renderers.
    pub fn rows(&self) -> (Vec<&'static str>, Vec<Vec<String>>) {
        match self {
            QueryReport::Sellers { sellers, .. } => (vec!["full_name"], name_rows(sellers)),
            QueryReport::TopClients { clients, .. } => (
                vec!["id", "full_name", "phone", "count"],
                clients
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.full_name.clone(),
                            c.phone.clone(),
                            c.count.to_string(),
                        ]
                    })
                    .collect(),
            ),
            QueryReport::CountsByType { counts, .. } => (
                vec!["estate_type", "count"],
                counts
                    .iter()
                    .map(|(t, n)| vec![t.to_string(), n.to_string()])
                    .collect(),
            ),
            QueryReport::MinPrice { price, clients } => (
                vec!["full_name", "price"],
                clients
                    .iter()
                    .map(|c| vec![c.clone(), price.to_string()])
                    .collect(),
            ),
            QueryReport::Seekers { clients, .. } => (vec!["full_name"], name_rows(clients)),
            QueryReport::Summary(s) => (
                vec!["collection", "count"],
                [
                    ("counterparties", s.counterparties),
                    ("estates", s.estates),
                    ("requests", s.requests),
                    ("buy_requests", s.buy_requests),
                    ("sell_requests", s.sell_requests),
                ]
                .iter()
                .map(|(k, v)| vec![k.to_string(), v.to_string()])
                .collect(),
            ),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Csv => self.render_csv(),
        }
    }

    fn render_table(&self) -> String {
        let (headers, rows) = self.rows();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let line = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(rows.len() + 2);
        out.push(line(headers.iter().map(|h| h.to_string()).collect()));
        out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
        if rows.is_empty() {
            out.push("(no rows)".to_string());
        }
        for row in rows {
            out.push(line(row));
        }
        out.join("\n")
    }

    fn render_csv(&self) -> Result<String> {
        let (headers, rows) = self.rows();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&headers)?;
        for row in &rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| RealtyError::IoError(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
