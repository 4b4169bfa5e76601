//! Payroll models
//!
//! Weekly pay periods and the two drilldown levels below them:
//! per-staff totals for a period, then individual shift lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One weekly pay period. `from`/`to` bound the worked week
/// (inclusive ISO dates); `pay_date` is the settlement Friday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPeriod {
    pub pay_date: String,
    pub from: String,
    pub to: String,
}

/// Per-staff totals within one period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummaryRow {
    pub username: String,
    #[serde(default)]
    pub total_hours: Decimal,
    #[serde(default)]
    pub total_pay: Decimal,
}

/// Summary level of the drilldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: PayrollPeriod,
    #[serde(default)]
    pub staff: Vec<PayrollSummaryRow>,
}

/// One worked shift inside a staff member's period detail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftLine {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub hours: Decimal,
    #[serde(default)]
    pub rate: Decimal,
    #[serde(default)]
    pub pay: Decimal,
}

/// Detail level of the drilldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffShiftDetail {
    pub period: PayrollPeriod,
    pub username: String,
    #[serde(default)]
    pub shifts: Vec<ShiftLine>,
}

impl StaffShiftDetail {
    /// Client-side recomputation of the period totals from the lines,
    /// rounded to 2 dp like the service's own aggregation.
    pub fn recomputed_totals(&self) -> (Decimal, Decimal) {
        let mut hours = Decimal::ZERO;
        let mut pay = Decimal::ZERO;
        for line in &self.shifts {
            hours += line.hours;
            pay += line.pay;
        }
        (hours.round_dp(2), pay.round_dp(2))
    }
}
