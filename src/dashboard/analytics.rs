//! Analytics View
//!
//! Read-only stats and lead list for one tenant, plus the client-side lead
//! search.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::types::Lead;

/// Case-insensitive substring match on name or email. An empty (or
/// whitespace-only) term keeps everything.
pub fn filter_leads<'a>(leads: &'a [Lead], term: &str) -> Vec<&'a Lead> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return leads.iter().collect();
    }

    leads
        .iter()
        .filter(|lead| {
            lead.name.to_lowercase().contains(&term) || lead.email.to_lowercase().contains(&term)
        })
        .collect()
}

/// `M/D/YYYY` in the viewer's local time zone, no zero padding
pub fn format_lead_date(timestamp: &DateTime<Utc>) -> String {
    format_lead_date_in(timestamp, &Local)
}

/// [`format_lead_date`] in an explicit time zone
pub fn format_lead_date_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String {
    let local = timestamp.with_timezone(tz);
    format!("{}/{}/{}", local.month(), local.day(), local.year())
}

/// Top queries paired with their 1-based rank
pub fn ranked_queries(queries: &[String]) -> Vec<(usize, &str)> {
    queries
        .iter()
        .enumerate()
        .map(|(i, q)| (i + 1, q.as_str()))
        .collect()
}

#[cfg(feature = "native")]
pub use view::{search_leads, AnalyticsView};

#[cfg(feature = "native")]
mod view {
    use super::filter_leads;
    use crate::client::ClientError;
    use crate::dashboard::ManagementApi;
    use crate::types::{AnalyticsSummary, Lead};

    /// Leads for one API key matching `term`. Unlike [`AnalyticsView::load`]
    /// a failed fetch is returned to the caller.
    pub async fn search_leads<A: ManagementApi + ?Sized>(
        api: &A,
        api_key: &str,
        term: &str,
    ) -> Result<Vec<Lead>, ClientError> {
        let leads = api.leads(api_key).await?;
        Ok(filter_leads(&leads, term).into_iter().cloned().collect())
    }

    /// Stats and leads for one API key, fetched independently
    #[derive(Debug, Clone, Default)]
    pub struct AnalyticsView {
        pub summary: Option<AnalyticsSummary>,
        pub leads: Vec<Lead>,
    }

    impl AnalyticsView {
        /// Fetch both parts concurrently. A failure in one is logged and
        /// leaves that part empty.
        pub async fn load<A: ManagementApi + ?Sized>(api: &A, api_key: &str) -> Self {
            let (summary, leads) = tokio::join!(api.analytics(api_key), api.leads(api_key));

            let summary = summary
                .map_err(|e| tracing::error!(error = %e, "Error loading analytics"))
                .ok();
            let leads = leads
                .map_err(|e| tracing::error!(error = %e, "Error loading leads"))
                .unwrap_or_default();

            Self { summary, leads }
        }

        pub fn search(&self, term: &str) -> Vec<&Lead> {
            filter_leads(&self.leads, term)
        }
    }
}
