//! Shared gateway fake and row builders for integration tests
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use rota_client::error::{ClientError, ClientResult};
use rota_client::gateway::AdminGateway;
use shared::client::{AccountCreate, Role, UserInfo};
use shared::models::{
    AuditEntry, ConflictNotice, DashboardCounts, OfferDecision, OfferRecord, OfferSendReply,
    OfferStatus, PayrollPeriod, PeriodSummary, Placement, PlacementPatch, ShiftLine, StaffProfile,
    StaffRecord, StaffRef, StaffShiftDetail, VenueCreate, VenueTemplate, VenueUpdate,
};

// ========== Row builders ==========

pub fn staff(id: &str, username: &str, full_name: &str) -> StaffRecord {
    StaffRecord {
        id: id.into(),
        username: username.into(),
        full_name: full_name.into(),
        email: None,
        dob: None,
        is_active: true,
        availability: None,
        created_at: None,
    }
}

pub fn placement(venue: &str, date: &str, start: &str, end: &str) -> Placement {
    Placement {
        venue: venue.into(),
        role_title: "Bar Staff".into(),
        date: date.into(),
        start_time: start.into(),
        end_time: end.into(),
        hourly_rate: Decimal::new(125, 1),
        total_hours: Decimal::ZERO,
        address_line: None,
        city: None,
        postcode: None,
        notes: None,
    }
}

pub fn offer(id: &str, staff_id: &str, p: Placement, status: OfferStatus) -> OfferRecord {
    OfferRecord {
        id: id.into(),
        staff: StaffRef::Id(staff_id.into()),
        placement: p,
        status,
        cancel_reason: String::new(),
        cancelled_at: None,
        completed_at: None,
        created_at: None,
    }
}

pub fn venue(id: &str, name: &str, address: &str, note: &str) -> VenueTemplate {
    VenueTemplate {
        id: id.into(),
        name: name.into(),
        address: address.into(),
        note: note.into(),
        created_by: None,
        created_at: None,
    }
}

pub fn period(pay_date: &str, from: &str, to: &str) -> PayrollPeriod {
    PayrollPeriod {
        pay_date: pay_date.into(),
        from: from.into(),
        to: to.into(),
    }
}

pub fn shift(date: &str, hours: i64, rate: i64) -> ShiftLine {
    ShiftLine {
        date: date.into(),
        venue: "Royal Oak".into(),
        start_time: "18:00".into(),
        end_time: "23:00".into(),
        hours: Decimal::from(hours),
        rate: Decimal::from(rate),
        pay: Decimal::from(hours * rate),
    }
}

pub fn conflict_notice(message: &str) -> ConflictNotice {
    ConflictNotice {
        code: "CONFLICT".into(),
        message: message.into(),
        conflicts: Vec::new(),
    }
}

pub fn sent(offer_id: &str) -> ClientResult<OfferSendReply> {
    Ok(OfferSendReply {
        offer_id: offer_id.into(),
    })
}

pub fn conflicted(message: &str) -> ClientResult<OfferSendReply> {
    Err(ClientError::Conflict(conflict_notice(message)))
}

fn not_seeded(what: &str) -> ClientError {
    ClientError::Service {
        status: 404,
        message: format!("{what} not seeded"),
    }
}

// ========== RecordingGateway ==========

/// In-memory stand-in for the HTTP gateway. Rows are seeded up front,
/// scripted queues override specific calls, and every mutation is
/// recorded for assertions.
#[derive(Default)]
pub struct RecordingGateway {
    // scripted responses, consumed front to back
    pub send_results: Mutex<VecDeque<ClientResult<OfferSendReply>>>,
    pub by_staff_results: Mutex<VecDeque<ClientResult<Vec<OfferRecord>>>>,

    // seeded state
    pub staff_rows: Mutex<Vec<StaffRecord>>,
    pub pending_rows: Mutex<Vec<OfferRecord>>,
    pub by_staff_rows: Mutex<HashMap<String, Vec<OfferRecord>>>,
    pub venue_rows: Mutex<Vec<VenueTemplate>>,
    pub period_rows: Mutex<Vec<PayrollPeriod>>,
    pub summaries: Mutex<HashMap<String, PeriodSummary>>,
    pub details: Mutex<HashMap<(String, String), StaffShiftDetail>>,

    // call records
    pub send_calls: Mutex<Vec<(String, Placement, bool)>>,
    pub staff_calls: AtomicUsize,
    pub by_staff_calls: AtomicUsize,
    pub pending_calls: AtomicUsize,
    pub summary_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub decide_calls: Mutex<Vec<(String, OfferDecision)>>,
    pub edit_calls: Mutex<Vec<(String, PlacementPatch)>>,
    pub cancel_calls: Mutex<Vec<(String, String)>>,
    pub complete_calls: Mutex<Vec<String>>,
    pub delete_calls: Mutex<Vec<String>>,
    pub active_calls: Mutex<Vec<(String, bool)>>,
    pub account_calls: Mutex<Vec<(String, String)>>,
}

impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn script_send(self: &Arc<Self>, results: Vec<ClientResult<OfferSendReply>>) {
        *self.send_results.lock().await = VecDeque::from(results);
    }

    pub async fn seed_staff(self: &Arc<Self>, rows: Vec<StaffRecord>) {
        *self.staff_rows.lock().await = rows;
    }

    pub async fn seed_pending(self: &Arc<Self>, rows: Vec<OfferRecord>) {
        *self.pending_rows.lock().await = rows;
    }

    pub async fn seed_by_staff(self: &Arc<Self>, staff_id: &str, rows: Vec<OfferRecord>) {
        self.by_staff_rows
            .lock()
            .await
            .insert(staff_id.to_string(), rows);
    }

    pub async fn seed_venues(self: &Arc<Self>, rows: Vec<VenueTemplate>) {
        *self.venue_rows.lock().await = rows;
    }

    pub async fn seed_period(self: &Arc<Self>, summary: PeriodSummary) {
        self.period_rows
            .lock()
            .await
            .push(summary.period.clone());
        self.summaries
            .lock()
            .await
            .insert(summary.period.pay_date.clone(), summary);
    }

    pub async fn seed_detail(self: &Arc<Self>, detail: StaffShiftDetail) {
        self.details.lock().await.insert(
            (detail.period.pay_date.clone(), detail.username.clone()),
            detail,
        );
    }

    pub async fn send_calls(&self) -> Vec<(String, Placement, bool)> {
        self.send_calls.lock().await.clone()
    }

    pub fn staff_fetches(&self) -> usize {
        self.staff_calls.load(Ordering::SeqCst)
    }

    pub fn pending_fetches(&self) -> usize {
        self.pending_calls.load(Ordering::SeqCst)
    }

    pub fn by_staff_fetches(&self) -> usize {
        self.by_staff_calls.load(Ordering::SeqCst)
    }

    pub fn summary_fetches(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn detail_fetches(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdminGateway for RecordingGateway {
    async fn login(&self, username: &str, _password: &str) -> ClientResult<UserInfo> {
        Ok(UserInfo {
            id: "admin-1".into(),
            username: username.into(),
            full_name: String::new(),
            role: Role::Admin,
            is_active: true,
        })
    }

    async fn create_staff(&self, account: &AccountCreate) -> ClientResult<()> {
        self.account_calls
            .lock()
            .await
            .push(("staff".into(), account.username.clone()));
        Ok(())
    }

    async fn create_manager(&self, account: &AccountCreate) -> ClientResult<()> {
        self.account_calls
            .lock()
            .await
            .push(("manager".into(), account.username.clone()));
        Ok(())
    }

    async fn fetch_staff(&self) -> ClientResult<Vec<StaffRecord>> {
        self.staff_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.staff_rows.lock().await.clone())
    }

    async fn fetch_staff_profile(&self, staff_id: &str) -> ClientResult<StaffProfile> {
        let staff = self
            .staff_rows
            .lock()
            .await
            .iter()
            .find(|s| s.id == staff_id)
            .cloned()
            .ok_or_else(|| not_seeded("staff profile"))?;
        Ok(StaffProfile {
            staff,
            total_jobs_worked: 0,
            total_hours_worked: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
        })
    }

    async fn set_staff_active(&self, staff_id: &str, is_active: bool) -> ClientResult<()> {
        self.active_calls
            .lock()
            .await
            .push((staff_id.to_string(), is_active));
        Ok(())
    }

    async fn fetch_dashboard(&self) -> ClientResult<DashboardCounts> {
        Ok(DashboardCounts {
            staff_total: self.staff_rows.lock().await.len() as u64,
            offers_pending: self.pending_rows.lock().await.len() as u64,
            ..Default::default()
        })
    }

    async fn send_offer(
        &self,
        staff_id: &str,
        placement: &Placement,
        force: bool,
    ) -> ClientResult<OfferSendReply> {
        self.send_calls
            .lock()
            .await
            .push((staff_id.to_string(), placement.clone(), force));
        self.send_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| sent("offer-fresh"))
    }

    async fn fetch_pending_offers(&self) -> ClientResult<Vec<OfferRecord>> {
        self.pending_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pending_rows.lock().await.clone())
    }

    async fn decide_offer(&self, offer_id: &str, decision: OfferDecision) -> ClientResult<()> {
        self.decide_calls
            .lock()
            .await
            .push((offer_id.to_string(), decision));
        Ok(())
    }

    async fn fetch_offers_by_staff(&self, staff_id: &str) -> ClientResult<Vec<OfferRecord>> {
        self.by_staff_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(scripted) = self.by_staff_results.lock().await.pop_front() {
            return scripted;
        }
        Ok(self
            .by_staff_rows
            .lock()
            .await
            .get(staff_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn edit_offer(&self, offer_id: &str, patch: &PlacementPatch) -> ClientResult<()> {
        self.edit_calls
            .lock()
            .await
            .push((offer_id.to_string(), patch.clone()));
        Ok(())
    }

    async fn delete_offer(&self, offer_id: &str) -> ClientResult<()> {
        self.delete_calls.lock().await.push(offer_id.to_string());
        Ok(())
    }

    async fn cancel_offer(&self, offer_id: &str, reason: &str) -> ClientResult<()> {
        self.cancel_calls
            .lock()
            .await
            .push((offer_id.to_string(), reason.to_string()));
        Ok(())
    }

    async fn complete_offer(&self, offer_id: &str) -> ClientResult<()> {
        self.complete_calls.lock().await.push(offer_id.to_string());
        Ok(())
    }

    async fn fetch_calendar(&self, _from: &str, _to: &str) -> ClientResult<Vec<OfferRecord>> {
        Ok(Vec::new())
    }

    async fn fetch_audit(&self) -> ClientResult<Vec<AuditEntry>> {
        Ok(Vec::new())
    }

    async fn list_payroll_periods(&self) -> ClientResult<Vec<PayrollPeriod>> {
        Ok(self.period_rows.lock().await.clone())
    }

    async fn fetch_period_summary(&self, pay_date: &str) -> ClientResult<PeriodSummary> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.summaries
            .lock()
            .await
            .get(pay_date)
            .cloned()
            .ok_or_else(|| not_seeded("period summary"))
    }

    async fn fetch_staff_shift_detail(
        &self,
        pay_date: &str,
        username: &str,
    ) -> ClientResult<StaffShiftDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .lock()
            .await
            .get(&(pay_date.to_string(), username.to_string()))
            .cloned()
            .ok_or_else(|| not_seeded("shift detail"))
    }

    async fn list_venues(&self) -> ClientResult<Vec<VenueTemplate>> {
        Ok(self.venue_rows.lock().await.clone())
    }

    async fn create_venue(&self, venue: &VenueCreate) -> ClientResult<VenueTemplate> {
        let mut rows = self.venue_rows.lock().await;
        let created = VenueTemplate {
            id: format!("v-{}", rows.len() + 1),
            name: venue.name.clone(),
            address: venue.address.clone(),
            note: venue.note.clone(),
            created_by: None,
            created_at: None,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update_venue(
        &self,
        venue_id: &str,
        patch: &VenueUpdate,
    ) -> ClientResult<VenueTemplate> {
        let mut rows = self.venue_rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|v| v.id == venue_id)
            .ok_or_else(|| not_seeded("venue"))?;
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(address) = &patch.address {
            row.address = address.clone();
        }
        if let Some(note) = &patch.note {
            row.note = note.clone();
        }
        Ok(row.clone())
    }

    async fn delete_venue(&self, venue_id: &str) -> ClientResult<()> {
        self.venue_rows.lock().await.retain(|v| v.id != venue_id);
        Ok(())
    }
}
