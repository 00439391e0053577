use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::LookupCache;
use crate::config::Settings;
use crate::faceit::FaceitApi;

#[derive(Clone)]
pub struct AppState {
    /// Upstream client, or `None` when no API key is configured. The
    /// lookup handler fails closed per request in that case.
    pub faceit: Option<Arc<dyn FaceitApi>>,
    pub cache: Arc<LookupCache>,
    pub settings: Arc<Settings>,
    pub started_at: DateTime<Utc>,
}
