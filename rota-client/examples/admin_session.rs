// rota-client/examples/admin_session.rs
// Walks the admin surfaces against a live scheduling service.

use std::sync::Arc;
use std::time::Duration;

use rota_client::{
    AdminGateway, ClientConfig, HistoryDesk, HttpGateway, PayrollDesk, StaffDesk, VenueBook,
    WeekWindow,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <username> <password>", args[0]);
        println!("  Service URL comes from ROTA_API_URL (default http://localhost:5000)");
        return Ok(());
    }
    let username = &args[1];
    let password = &args[2];

    let base_url =
        std::env::var("ROTA_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

    let gateway = Arc::new(HttpGateway::new(&ClientConfig::new(&base_url)));
    let user = gateway.login(username, password).await?;
    tracing::info!(user = %user.username, role = ?user.role, "logged in");

    let counts = gateway.fetch_dashboard().await?;
    tracing::info!(
        staff = counts.staff_total,
        pending = counts.offers_pending,
        completed = counts.offers_completed,
        "dashboard"
    );

    // Staff directory with its debounced search
    let staff = StaffDesk::new(gateway.clone());
    let loaded = staff.reload().await?;
    tracing::info!(loaded, "staff directory loaded");

    staff.list().set_query("a").await;
    tokio::time::sleep(Duration::from_millis(400)).await;
    tracing::info!(matches = staff.list().current().len(), "directory search settled");

    // Venue quick-pick
    let venues = VenueBook::new(gateway.clone());
    venues.reload().await?;
    tracing::info!(suggestions = ?venues.suggestions("ro").await, "venue suggestions");

    // One staff member's career totals and this week's history
    if let Some(first) = staff.list().current().first() {
        let profile = staff.profile(&first.id).await?;
        tracing::info!(
            staff = %first.username,
            jobs = profile.total_jobs_worked,
            hours = %profile.total_hours_worked,
            "career totals"
        );

        let history = HistoryDesk::new(gateway.clone());
        history.open_staff(&first.id).await?;
        history.set_window(WeekWindow::ThisWeek).await;
        tracing::info!(
            staff = %first.username,
            rows = history.current().len(),
            "history for this week"
        );
    }

    // Everyone's bookings over the coming week
    let today = chrono::Local::now().date_naive();
    let horizon = today + chrono::Days::new(7);
    let upcoming = gateway
        .fetch_calendar(
            &today.format("%Y-%m-%d").to_string(),
            &horizon.format("%Y-%m-%d").to_string(),
        )
        .await?;
    tracing::info!(bookings = upcoming.len(), "calendar for the coming week");

    // Payroll drilldown: newest period, first listed staff member
    let payroll = PayrollDesk::new(gateway.clone());
    payroll.load_periods().await?;
    if let Some(period) = payroll.periods().await.first() {
        let summary = payroll.select_period(&period.pay_date).await?;
        tracing::info!(pay_date = %period.pay_date, staff = summary.staff.len(), "period summary");

        if let Some(row) = summary.staff.first() {
            let view = payroll.select_staff(&row.username).await?;
            tracing::info!(
                username = %row.username,
                hours = %view.total_hours,
                pay = %view.total_pay,
                agreed = view.mismatch.is_none(),
                "shift detail"
            );
        }

        let out = std::env::temp_dir().join("payroll.csv");
        rota_client::export::write_payroll_csv(&out, &summary)?;
        tracing::info!(path = %out.display(), "payroll summary exported");
    }

    // Recent audit trail
    match gateway.fetch_audit().await {
        Ok(entries) => tracing::info!(entries = entries.len(), "audit log"),
        Err(e) => tracing::warn!("audit fetch failed: {e}"),
    }

    gateway.logout().await;
    Ok(())
}
