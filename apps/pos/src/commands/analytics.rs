//! # Analytics Command
//!
//! Dashboard report anchored on the local clock.

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use ledger_core::AnalyticsReport;

pub async fn get_analytics(state: &AppState) -> Result<AnalyticsReport, ApiError> {
    get_analytics_at(state, &Local::now()).await
}

/// [`get_analytics`] with an explicit clock and calendar.
pub async fn get_analytics_at<Tz: TimeZone>(
    state: &AppState,
    now: &DateTime<Tz>,
) -> Result<AnalyticsReport, ApiError> {
    debug!("get_analytics command");
    Ok(state.db().analytics().report(now).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::invoice::create_invoice_at;
    use crate::commands::test_support::state;
    use chrono::Utc;
    use ledger_core::NewInvoice;

    fn invoice(total: f64) -> NewInvoice {
        NewInvoice {
            customer_id: Some(1),
            total,
            items: vec![],
        }
    }

    #[tokio::test]
    async fn test_current_vs_last_month() {
        let state = state().await;
        let at = |m, d| Utc.with_ymd_and_hms(2024, m, d, 12, 0, 0).unwrap();

        create_invoice_at(&state, invoice(100.0), &at(3, 2)).await.unwrap();
        create_invoice_at(&state, invoice(200.0), &at(3, 15)).await.unwrap();
        create_invoice_at(&state, invoice(50.0), &at(2, 20)).await.unwrap();

        let report = get_analytics_at(&state, &at(3, 20)).await.unwrap();

        assert_eq!(report.current_month_revenue, 300.0);
        assert_eq!(report.last_month_revenue, 50.0);
        assert_eq!(report.monthly_revenue.len(), 12);
        assert_eq!(report.monthly_revenue[11].month, "Mar");
        assert_eq!(report.monthly_revenue[11].revenue, 300.0);
        assert_eq!(report.monthly_revenue[10].revenue, 50.0);
    }
}
