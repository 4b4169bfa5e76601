//! Payroll drilldown
//!
//! Three levels, each fetched only when its parent selection changes:
//! pay periods, then per-staff totals for one period, then the shift
//! lines behind one staff member. Changing an ancestor selection
//! drops everything below it.

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use shared::models::{PayrollPeriod, PeriodSummary, StaffShiftDetail};

use crate::cache::CacheSlot;
use crate::error::{ClientError, ClientResult};
use crate::gateway::AdminGateway;

/// Summary row and recomputed shift sums that should have agreed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollMismatch {
    pub username: String,
    pub summary_hours: Decimal,
    pub summary_pay: Decimal,
    pub detail_hours: Decimal,
    pub detail_pay: Decimal,
}

/// What the page shows for a selected staff member. The displayed
/// totals are summed client-side over the shift lines; the summary
/// row's figures are only used as a cross-check.
#[derive(Debug, Clone)]
pub struct StaffPayView {
    pub total_hours: Decimal,
    pub total_pay: Decimal,
    pub mismatch: Option<PayrollMismatch>,
    pub detail: StaffShiftDetail,
}

pub struct PayrollDesk {
    gateway: Arc<dyn AdminGateway>,
    periods: Arc<CacheSlot<PayrollPeriod>>,
    summary: RwLock<Option<PeriodSummary>>,
    detail: RwLock<Option<StaffShiftDetail>>,
}

impl PayrollDesk {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Self {
        Self {
            gateway,
            periods: CacheSlot::new("payroll_periods"),
            summary: RwLock::new(None),
            detail: RwLock::new(None),
        }
    }

    /// Load the period list, once per view session
    pub async fn load_periods(&self) -> ClientResult<usize> {
        self.periods
            .reload(self.gateway.list_payroll_periods())
            .await
    }

    pub async fn periods(&self) -> Vec<PayrollPeriod> {
        self.periods.snapshot().await
    }

    pub async fn summary(&self) -> Option<PeriodSummary> {
        self.summary.read().await.clone()
    }

    /// Select a pay period. Re-selecting the current one is a cache
    /// hit; anything else fetches its summary and drops the staff
    /// selection and shift detail below it.
    pub async fn select_period(&self, pay_date: &str) -> ClientResult<PeriodSummary> {
        if let Some(summary) = self.summary.read().await.as_ref()
            && summary.period.pay_date == pay_date
        {
            return Ok(summary.clone());
        }

        let fetched = self.gateway.fetch_period_summary(pay_date).await?;
        *self.detail.write().await = None;
        *self.summary.write().await = Some(fetched.clone());
        Ok(fetched)
    }

    /// Refetch the selected period on demand, dropping the loaded
    /// detail. The cache-hit rule only yields to this.
    pub async fn reload_period(&self) -> ClientResult<PeriodSummary> {
        let Some(pay_date) = self.selected_pay_date().await else {
            return Err(ClientError::Validation("select a pay period first".into()));
        };

        let fetched = self.gateway.fetch_period_summary(&pay_date).await?;
        *self.detail.write().await = None;
        *self.summary.write().await = Some(fetched.clone());
        Ok(fetched)
    }

    /// Select a staff member within the selected period. Re-selecting
    /// the loaded one rebuilds the view from cache without a fetch.
    pub async fn select_staff(&self, username: &str) -> ClientResult<StaffPayView> {
        let Some(summary) = self.summary.read().await.clone() else {
            return Err(ClientError::Validation("select a pay period first".into()));
        };

        let cached = self.detail.read().await.clone();
        let detail = match cached {
            Some(d) if d.username == username && d.period.pay_date == summary.period.pay_date => d,
            _ => {
                let fetched = self
                    .gateway
                    .fetch_staff_shift_detail(&summary.period.pay_date, username)
                    .await?;
                *self.detail.write().await = Some(fetched.clone());
                fetched
            }
        };

        Ok(build_view(&summary, detail))
    }

    async fn selected_pay_date(&self) -> Option<String> {
        self.summary
            .read()
            .await
            .as_ref()
            .map(|s| s.period.pay_date.clone())
    }
}

/// Sum the shift lines and cross-check them against the summary row.
/// Disagreement is reported, never papered over; the recomputed sums
/// are what gets displayed either way.
fn build_view(summary: &PeriodSummary, detail: StaffShiftDetail) -> StaffPayView {
    let (hours, pay) = detail.recomputed_totals();

    let (summary_hours, summary_pay) = summary
        .staff
        .iter()
        .find(|row| row.username == detail.username)
        .map(|row| (row.total_hours, row.total_pay))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    let mismatch = if summary_hours != hours || summary_pay != pay {
        Some(PayrollMismatch {
            username: detail.username.clone(),
            summary_hours,
            summary_pay,
            detail_hours: hours,
            detail_pay: pay,
        })
    } else {
        None
    };

    if let Some(m) = &mismatch {
        warn!(
            username = %m.username,
            summary_hours = %m.summary_hours,
            detail_hours = %m.detail_hours,
            summary_pay = %m.summary_pay,
            detail_pay = %m.detail_pay,
            "payroll summary disagrees with shift detail"
        );
    }

    StaffPayView {
        total_hours: hours,
        total_pay: pay,
        mismatch,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{PayrollSummaryRow, ShiftLine};

    fn period() -> PayrollPeriod {
        PayrollPeriod {
            pay_date: "2026-01-09".into(),
            from: "2025-12-29".into(),
            to: "2026-01-04".into(),
        }
    }

    fn summary_with(username: &str, hours: Decimal, pay: Decimal) -> PeriodSummary {
        PeriodSummary {
            period: period(),
            staff: vec![PayrollSummaryRow {
                username: username.into(),
                total_hours: hours,
                total_pay: pay,
            }],
        }
    }

    fn detail_with(username: &str, lines: &[(i64, i64)]) -> StaffShiftDetail {
        StaffShiftDetail {
            period: period(),
            username: username.into(),
            shifts: lines
                .iter()
                .map(|&(hours, rate)| ShiftLine {
                    hours: Decimal::from(hours),
                    rate: Decimal::from(rate),
                    pay: Decimal::from(hours * rate),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_agreeing_totals_produce_no_mismatch() {
        let summary = summary_with("jsmith", Decimal::from(12), Decimal::from(156));
        let view = build_view(&summary, detail_with("jsmith", &[(8, 12), (4, 15)]));

        assert_eq!(view.total_hours, Decimal::from(12));
        assert_eq!(view.total_pay, Decimal::from(156));
        assert!(view.mismatch.is_none());
    }

    #[test]
    fn test_scale_differences_still_agree() {
        // 12.00 vs 12 is the same quantity
        let summary = summary_with("jsmith", Decimal::new(1200, 2), Decimal::new(15600, 2));
        let view = build_view(&summary, detail_with("jsmith", &[(8, 12), (4, 15)]));
        assert!(view.mismatch.is_none());
    }

    #[test]
    fn test_disagreement_is_reported_and_recomputed_sums_win() {
        let summary = summary_with("jsmith", Decimal::from(12), Decimal::from(200));
        let view = build_view(&summary, detail_with("jsmith", &[(8, 12), (4, 15)]));

        assert_eq!(view.total_pay, Decimal::from(156));
        let m = view.mismatch.unwrap();
        assert_eq!(m.summary_pay, Decimal::from(200));
        assert_eq!(m.detail_pay, Decimal::from(156));
        assert_eq!(m.username, "jsmith");
    }

    #[test]
    fn test_staff_missing_from_summary_with_worked_shifts_is_a_mismatch() {
        let summary = PeriodSummary {
            period: period(),
            staff: Vec::new(),
        };
        let view = build_view(&summary, detail_with("ghost", &[(4, 10)]));

        let m = view.mismatch.unwrap();
        assert_eq!(m.summary_pay, Decimal::ZERO);
        assert_eq!(m.detail_pay, Decimal::from(40));
    }

    #[test]
    fn test_empty_detail_for_unlisted_staff_is_consistent() {
        let summary = PeriodSummary {
            period: period(),
            staff: Vec::new(),
        };
        let view = build_view(&summary, detail_with("newbie", &[]));
        assert!(view.mismatch.is_none());
        assert_eq!(view.total_pay, Decimal::ZERO);
    }
}
