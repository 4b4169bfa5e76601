//! CSV export of filtered views
//!
//! Takes whatever rows the caller is currently looking at; never
//! refetches. Quoting follows RFC 4180: only fields containing a
//! comma, quote or line break are quoted, embedded quotes doubled.

use std::fs;
use std::io;
use std::path::Path;

use shared::models::{OfferRecord, PeriodSummary};

fn field(raw: &str) -> String {
    if raw.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn push_row<const N: usize>(out: &mut String, cols: [String; N]) {
    out.push_str(&cols.join(","));
    out.push('\n');
}

/// Schedule-history rows as shown after filtering
pub fn history_csv(offers: &[OfferRecord]) -> String {
    let mut out = String::from("Venue,Date,Start,End,Rate,Status\n");
    for offer in offers {
        let p = &offer.placement;
        push_row(
            &mut out,
            [
                field(&p.venue),
                field(p.day()),
                field(&p.start_time),
                field(&p.end_time),
                p.hourly_rate.to_string(),
                offer.status.as_str().to_string(),
            ],
        );
    }
    out
}

/// Per-staff summary of one pay period, pay always padded to 2 dp
pub fn payroll_csv(summary: &PeriodSummary) -> String {
    let mut out = String::from("payDate,periodFrom,periodTo,username,totalHours,totalPay\n");
    let period = &summary.period;
    for row in &summary.staff {
        push_row(
            &mut out,
            [
                field(&period.pay_date),
                field(&period.from),
                field(&period.to),
                field(&row.username),
                row.total_hours.to_string(),
                format!("{:.2}", row.total_pay),
            ],
        );
    }
    out
}

pub fn write_history_csv(path: &Path, offers: &[OfferRecord]) -> io::Result<()> {
    fs::write(path, history_csv(offers))
}

pub fn write_payroll_csv(path: &Path, summary: &PeriodSummary) -> io::Result<()> {
    fs::write(path, payroll_csv(summary))
}
