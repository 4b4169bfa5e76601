//! Staff directory, profiles and account creation

use std::sync::Arc;
use tracing::info;

use shared::client::AccountCreate;
use shared::models::{DashboardCounts, StaffProfile, StaffRecord};

use crate::cache::CacheSlot;
use crate::error::{ClientError, ClientResult};
use crate::gateway::AdminGateway;
use crate::search::FilteredView;

/// New staff or manager account as entered in the form
#[derive(Debug, Clone, Default)]
pub struct AccountDraft {
    pub full_name: String,
    pub email: String,
    /// "YYYY-MM-DD"
    pub dob: String,
    pub username: String,
    pub password: String,
}

impl AccountDraft {
    fn validate(&self) -> ClientResult<AccountCreate> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "username and password are required".into(),
            ));
        }
        Ok(AccountCreate {
            username: username.to_string(),
            password: password.to_string(),
            full_name: self.full_name.trim().to_string(),
            email: none_if_empty(self.email.trim()),
            dob: none_if_empty(self.dob.trim()),
        })
    }
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// The staff directory with its debounce-searched list view
pub struct StaffDesk {
    gateway: Arc<dyn AdminGateway>,
    cache: Arc<CacheSlot<StaffRecord>>,
    list: FilteredView<StaffRecord>,
}

impl StaffDesk {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Self {
        let cache = CacheSlot::new("staff");
        let list = FilteredView::new(Arc::clone(&cache));
        Self {
            gateway,
            cache,
            list,
        }
    }

    /// Searchable directory view, matched on full name and username
    pub fn list(&self) -> &FilteredView<StaffRecord> {
        &self.list
    }

    pub async fn reload(&self) -> ClientResult<usize> {
        let count = self.cache.reload(self.gateway.fetch_staff()).await?;
        self.list.refresh().await;
        Ok(count)
    }

    /// Profile with lifetime work figures, always fetched fresh
    pub async fn profile(&self, staff_id: &str) -> ClientResult<StaffProfile> {
        self.gateway.fetch_staff_profile(staff_id).await
    }

    /// Suspend or reinstate an account, then reload the directory so
    /// the listed status matches
    pub async fn set_active(&self, staff_id: &str, active: bool) -> ClientResult<()> {
        self.gateway.set_staff_active(staff_id, active).await?;
        info!(staff_id, active, "staff active flag updated");
        self.reload().await?;
        Ok(())
    }

    pub async fn create_staff(&self, draft: &AccountDraft) -> ClientResult<()> {
        let account = draft.validate()?;
        self.gateway.create_staff(&account).await?;
        info!(username = %account.username, "staff account created");
        self.reload().await?;
        Ok(())
    }

    /// Manager accounts can only be created by an admin; the service
    /// enforces that and anyone else gets the error back verbatim
    pub async fn create_manager(&self, draft: &AccountDraft) -> ClientResult<()> {
        let account = draft.validate()?;
        self.gateway.create_manager(&account).await?;
        info!(username = %account.username, "manager account created");
        self.reload().await?;
        Ok(())
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardCounts> {
        self.gateway.fetch_dashboard().await
    }
}
