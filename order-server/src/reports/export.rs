//! Row-oriented exports
//!
//! Rows are ordered column → value maps handed to spreadsheet / print
//! surfaces; formatting the bytes is left to them.

use std::collections::HashMap;

use chrono_tz::Tz;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use sqlx::SqlitePool;

use super::period::{Period, ReportWindow};
use super::summarize;
use crate::db::repository::report::ExportLine;
use crate::db::repository::{order, report};
use crate::utils::codes::invoice_number;
use crate::utils::money::{profit, round_money, to_decimal, to_f64};
use crate::utils::time::{day_end_millis, day_start_millis, format_datetime, weekday_name};
use crate::utils::AppResult;

/// One export row; serializes as a JSON object in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRow(Vec<(&'static str, Value)>);

impl ExportRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, label: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((label, value.into()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.iter().find(|(l, _)| *l == label).map(|(_, v)| v)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|(l, _)| *l).collect()
    }
}

impl Serialize for ExportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Per-day figures, one aggregation round-trip per calendar day
///
/// The `today` period exports a single summary row instead.
pub async fn daily_export(
    pool: &SqlitePool,
    window: &ReportWindow,
    tz: Tz,
) -> AppResult<Vec<ExportRow>> {
    let range = &window.range;

    if window.period == Some(Period::Today) {
        let summary = summarize(pool, range.start, range.end).await?;
        return Ok(vec![
            ExportRow::new()
                .column("Period", range.first_day.format("%Y-%m-%d").to_string())
                .column("Revenue", summary.revenue)
                .column("Cost", summary.cost)
                .column("Profit", summary.profit)
                .column("Margin (%)", summary.profit_margin)
                .column("Completed Orders", summary.completed_orders),
        ]);
    }

    let mut rows = Vec::new();
    for day in range.days() {
        let summary = summarize(pool, day_start_millis(day, tz), day_end_millis(day, tz)).await?;
        rows.push(
            ExportRow::new()
                .column("Date", day.format("%Y-%m-%d").to_string())
                .column("Weekday", weekday_name(day))
                .column("Revenue", summary.revenue)
                .column("Cost", summary.cost)
                .column("Profit", summary.profit)
                .column("Margin (%)", summary.profit_margin)
                .column("Orders", summary.completed_orders),
        );
    }
    Ok(rows)
}

/// One row per completed order in the window, oldest first
pub async fn orders_export(
    pool: &SqlitePool,
    window: &ReportWindow,
    tz: Tz,
) -> AppResult<Vec<ExportRow>> {
    let range = &window.range;
    let orders = order::find_completed_between(pool, range.start, range.end).await?;

    let mut lines_by_order: HashMap<i64, Vec<ExportLine>> = HashMap::new();
    for line in report::export_lines(pool, range.start, range.end).await? {
        lines_by_order.entry(line.order_id).or_default().push(line);
    }

    let rows = orders
        .into_iter()
        .map(|o| {
            let lines = lines_by_order.remove(&o.id).unwrap_or_default();
            let items = lines
                .iter()
                .map(|l| {
                    format!(
                        "{} ({}×{:.2})",
                        l.name.as_deref().unwrap_or("Unspecified"),
                        l.quantity,
                        l.unit_price
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            let cost = to_f64(lines.iter().map(|l| to_decimal(l.line_cost)).sum());
            let revenue = round_money(o.total_amount);

            ExportRow::new()
                .column("Order", invoice_number(o.id))
                .column("Created", format_datetime(o.created_at, tz))
                .column("Type", if o.table_id.is_some() { "Dine-in" } else { "Delivery" })
                .column("Table", o.table_number.unwrap_or_else(|| "-".to_string()))
                .column("Hall", o.hall_name.unwrap_or_else(|| "-".to_string()))
                .column("Items", items)
                .column("Revenue", revenue)
                .column("Cost", cost)
                .column("Profit", profit(revenue, cost))
        })
        .collect();
    Ok(rows)
}
