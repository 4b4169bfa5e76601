//! HTTP gateway to the scheduling service
//!
//! One typed method per endpoint, bearer auth from the session, and a
//! single response-handling path that maps statuses onto
//! [`ClientError`]. The surface is a trait so view state can be
//! exercised against a fake in tests.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use shared::client::{AccountCreate, LoginRequest, LoginResponse, UserInfo};
use shared::models::{
    AuditEntry, CancelRequest, ConflictNotice, DashboardCounts, DecisionRequest, OfferDecision,
    OfferListing, OfferRecord, OfferSendReply, OfferSendRequest, PayrollPeriod, PeriodSummary,
    Placement, PlacementPatch, StaffActiveUpdate, StaffProfile, StaffRecord, StaffShiftDetail,
    VenueCreate, VenueTemplate, VenueUpdate,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Everything the admin desktop asks of the scheduling service
#[async_trait]
pub trait AdminGateway: Send + Sync {
    // ========== Auth ==========

    /// Authenticate and open the session. The only operation that can
    /// return [`ClientError::Auth`].
    async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo>;
    async fn create_staff(&self, account: &AccountCreate) -> ClientResult<()>;
    async fn create_manager(&self, account: &AccountCreate) -> ClientResult<()>;

    // ========== Staff ==========

    async fn fetch_staff(&self) -> ClientResult<Vec<StaffRecord>>;
    async fn fetch_staff_profile(&self, staff_id: &str) -> ClientResult<StaffProfile>;
    async fn set_staff_active(&self, staff_id: &str, is_active: bool) -> ClientResult<()>;
    async fn fetch_dashboard(&self) -> ClientResult<DashboardCounts>;

    // ========== Offers ==========

    /// Place an offer. `force = true` overrides a detected booking
    /// clash and is only ever sent after the operator confirms.
    async fn send_offer(
        &self,
        staff_id: &str,
        placement: &Placement,
        force: bool,
    ) -> ClientResult<OfferSendReply>;
    async fn fetch_pending_offers(&self) -> ClientResult<Vec<OfferRecord>>;
    async fn decide_offer(&self, offer_id: &str, decision: OfferDecision) -> ClientResult<()>;
    async fn fetch_offers_by_staff(&self, staff_id: &str) -> ClientResult<Vec<OfferRecord>>;
    async fn edit_offer(&self, offer_id: &str, patch: &PlacementPatch) -> ClientResult<()>;
    async fn delete_offer(&self, offer_id: &str) -> ClientResult<()>;
    async fn cancel_offer(&self, offer_id: &str, reason: &str) -> ClientResult<()>;
    async fn complete_offer(&self, offer_id: &str) -> ClientResult<()>;
    async fn fetch_calendar(&self, from: &str, to: &str) -> ClientResult<Vec<OfferRecord>>;

    // ========== Audit ==========

    async fn fetch_audit(&self) -> ClientResult<Vec<AuditEntry>>;

    // ========== Payroll ==========

    async fn list_payroll_periods(&self) -> ClientResult<Vec<PayrollPeriod>>;
    async fn fetch_period_summary(&self, pay_date: &str) -> ClientResult<PeriodSummary>;
    async fn fetch_staff_shift_detail(
        &self,
        pay_date: &str,
        username: &str,
    ) -> ClientResult<StaffShiftDetail>;

    // ========== Venues ==========

    async fn list_venues(&self) -> ClientResult<Vec<VenueTemplate>>;
    async fn create_venue(&self, venue: &VenueCreate) -> ClientResult<VenueTemplate>;
    async fn update_venue(&self, venue_id: &str, patch: &VenueUpdate)
    -> ClientResult<VenueTemplate>;
    async fn delete_venue(&self, venue_id: &str) -> ClientResult<()>;
}

/// Gateway backed by a real HTTP connection
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
    session: Arc<Session>,
}

impl HttpGateway {
    /// Build from configuration with a fresh (closed) session
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_session(config, Arc::new(Session::new()))
    }

    /// Build from configuration around an existing session
    pub fn with_session(config: &ClientConfig, session: Arc<Session>) -> Self {
        let timeout = Duration::from_secs(config.timeout);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            session,
        }
    }

    /// The session this gateway authenticates from
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Close the session; subsequent auth-required calls fail locally
    pub async fn logout(&self) {
        self.session.close().await;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authed(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.session.token().await.ok_or(ClientError::NoSession)?;
        Ok(request.header(header::AUTHORIZATION, format!("Bearer {}", token)))
    }

    /// Send a request and decode the success body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;

        if !status.is_success() {
            return Err(classify(status, &text));
        }
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Send a request and discard whatever the success body was
    async fn send_discard(&self, request: RequestBuilder) -> ClientResult<()> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| ClientError::transport(e, self.timeout))?;
            return Err(classify(status, &text));
        }
        Ok(())
    }
}

/// Map a non-success response onto the error taxonomy. A 409 carrying
/// the machine-readable conflict code is the one structured case;
/// everything else is opaque.
fn classify(status: StatusCode, body: &str) -> ClientError {
    if status == StatusCode::CONFLICT
        && let Ok(notice) = serde_json::from_str::<ConflictNotice>(body)
        && notice.code == "CONFLICT"
    {
        return ClientError::Conflict(notice);
    }

    ClientError::Service {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// Error bodies are usually `{"message": "..."}`; fall back to raw text
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Msg {
        message: String,
    }

    serde_json::from_str::<Msg>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl AdminGateway for HttpGateway {
    // ========== Auth ==========

    async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let request = self.client.post(self.url("/auth/login")).json(&body);
        let resp: LoginResponse = match self.send(request).await {
            Err(ClientError::Service {
                status: 401 | 403,
                message,
            }) => return Err(ClientError::Auth(message)),
            other => other?,
        };

        self.session.open(resp.token, resp.user.clone()).await;
        Ok(resp.user)
    }

    async fn create_staff(&self, account: &AccountCreate) -> ClientResult<()> {
        let request = self.client.post(self.url("/auth/create-staff")).json(account);
        self.send_discard(self.authed(request).await?).await
    }

    async fn create_manager(&self, account: &AccountCreate) -> ClientResult<()> {
        let request = self
            .client
            .post(self.url("/auth/create-manager"))
            .json(account);
        self.send_discard(self.authed(request).await?).await
    }

    // ========== Staff ==========

    async fn fetch_staff(&self) -> ClientResult<Vec<StaffRecord>> {
        let request = self.client.get(self.url("/admin/staff"));
        self.send(self.authed(request).await?).await
    }

    async fn fetch_staff_profile(&self, staff_id: &str) -> ClientResult<StaffProfile> {
        let request = self
            .client
            .get(self.url(&format!("/admin/staff/{}", staff_id)));
        self.send(self.authed(request).await?).await
    }

    async fn set_staff_active(&self, staff_id: &str, is_active: bool) -> ClientResult<()> {
        let request = self
            .client
            .patch(self.url(&format!("/admin/staff/{}/active", staff_id)))
            .json(&StaffActiveUpdate { is_active });
        self.send_discard(self.authed(request).await?).await
    }

    async fn fetch_dashboard(&self) -> ClientResult<DashboardCounts> {
        let request = self.client.get(self.url("/admin/dashboard"));
        self.send(self.authed(request).await?).await
    }

    // ========== Offers ==========

    async fn send_offer(
        &self,
        staff_id: &str,
        placement: &Placement,
        force: bool,
    ) -> ClientResult<OfferSendReply> {
        let body = OfferSendRequest {
            user_id: staff_id.to_string(),
            placement: placement.clone(),
            force,
        };
        let request = self.client.post(self.url("/offers/send")).json(&body);
        self.send(self.authed(request).await?).await
    }

    async fn fetch_pending_offers(&self) -> ClientResult<Vec<OfferRecord>> {
        let request = self.client.get(self.url("/offers/pending"));
        self.send(self.authed(request).await?).await
    }

    async fn decide_offer(&self, offer_id: &str, decision: OfferDecision) -> ClientResult<()> {
        let request = self
            .client
            .patch(self.url(&format!("/offers/{}/decision", offer_id)))
            .json(&DecisionRequest { decision });
        self.send_discard(self.authed(request).await?).await
    }

    async fn fetch_offers_by_staff(&self, staff_id: &str) -> ClientResult<Vec<OfferRecord>> {
        let request = self
            .client
            .get(self.url(&format!("/admin/offers/by-staff/{}", staff_id)));
        let listing: OfferListing = self.send(self.authed(request).await?).await?;
        Ok(listing.into_vec())
    }

    async fn edit_offer(&self, offer_id: &str, patch: &PlacementPatch) -> ClientResult<()> {
        let request = self
            .client
            .put(self.url(&format!("/offers/admin/offers/{}", offer_id)))
            .json(patch);
        self.send_discard(self.authed(request).await?).await
    }

    async fn delete_offer(&self, offer_id: &str) -> ClientResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/admin/offers/{}", offer_id)));
        self.send_discard(self.authed(request).await?).await
    }

    async fn cancel_offer(&self, offer_id: &str, reason: &str) -> ClientResult<()> {
        let request = self
            .client
            .post(self.url(&format!("/admin/offers/{}/cancel", offer_id)))
            .json(&CancelRequest {
                reason: reason.to_string(),
            });
        self.send_discard(self.authed(request).await?).await
    }

    async fn complete_offer(&self, offer_id: &str) -> ClientResult<()> {
        let request = self
            .client
            .post(self.url(&format!("/admin/offers/{}/complete", offer_id)));
        self.send_discard(self.authed(request).await?).await
    }

    async fn fetch_calendar(&self, from: &str, to: &str) -> ClientResult<Vec<OfferRecord>> {
        let request = self
            .client
            .get(self.url("/admin/calendar"))
            .query(&[("from", from), ("to", to)]);
        self.send(self.authed(request).await?).await
    }

    // ========== Audit ==========

    async fn fetch_audit(&self) -> ClientResult<Vec<AuditEntry>> {
        let request = self.client.get(self.url("/admin/audit"));
        self.send(self.authed(request).await?).await
    }

    // ========== Payroll ==========

    async fn list_payroll_periods(&self) -> ClientResult<Vec<PayrollPeriod>> {
        let request = self.client.get(self.url("/admin/payroll/periods"));
        self.send(self.authed(request).await?).await
    }

    async fn fetch_period_summary(&self, pay_date: &str) -> ClientResult<PeriodSummary> {
        let request = self
            .client
            .get(self.url(&format!("/admin/payroll/period/{}", pay_date)));
        self.send(self.authed(request).await?).await
    }

    async fn fetch_staff_shift_detail(
        &self,
        pay_date: &str,
        username: &str,
    ) -> ClientResult<StaffShiftDetail> {
        let request = self.client.get(self.url(&format!(
            "/admin/payroll/period/{}/staff/{}",
            pay_date, username
        )));
        self.send(self.authed(request).await?).await
    }

    // ========== Venues ==========

    async fn list_venues(&self) -> ClientResult<Vec<VenueTemplate>> {
        let request = self.client.get(self.url("/admin/venues"));
        self.send(self.authed(request).await?).await
    }

    async fn create_venue(&self, venue: &VenueCreate) -> ClientResult<VenueTemplate> {
        let request = self.client.post(self.url("/admin/venues")).json(venue);
        self.send(self.authed(request).await?).await
    }

    async fn update_venue(
        &self,
        venue_id: &str,
        patch: &VenueUpdate,
    ) -> ClientResult<VenueTemplate> {
        let request = self
            .client
            .patch(self.url(&format!("/admin/venues/{}", venue_id)))
            .json(patch);
        self.send(self.authed(request).await?).await
    }

    async fn delete_venue(&self, venue_id: &str) -> ClientResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/admin/venues/{}", venue_id)));
        self.send_discard(self.authed(request).await?).await
    }
}
