//! Dashboard data.

use ambassador_core::filter::{CustomerFilter, RecordFilter, WithdrawalFilter};
use ambassador_core::types::{Customer, DepositRecord, Withdrawal};
use ambassador_core::{DashboardSummary, Error, Result};
use jiff::civil::Date;

use crate::connect::{ApiClient, TRACING_TARGET};

impl ApiClient {
    /// Computes the dashboard cards for `today` and the day before.
    ///
    /// Withdrawals, deposits and customers are fetched concurrently; the
    /// first failure aborts the whole summary.
    pub async fn dashboard(&self, today: Date) -> Result<DashboardSummary> {
        let yesterday = today.yesterday().map_err(|e| {
            Error::invalid_input()
                .with_message(e.to_string())
                .with_source(e)
        })?;

        let withdrawal_filter = WithdrawalFilter::default().with_date_range(yesterday, today);
        let record_filter = RecordFilter::default().with_date_range(yesterday, today);
        let customer_filter = CustomerFilter::default().with_date_range(yesterday, today);

        let (withdrawals, deposits, customers) = futures::try_join!(
            self.list::<Withdrawal>(&withdrawal_filter),
            self.list::<DepositRecord>(&record_filter),
            self.list::<Customer>(&customer_filter),
        )?;

        tracing::debug!(
            target: TRACING_TARGET,
            withdrawals = withdrawals.len(),
            deposits = deposits.len(),
            customers = customers.len(),
            "Dashboard data fetched"
        );

        Ok(DashboardSummary::compute(
            today,
            yesterday,
            &withdrawals,
            &deposits,
            &customers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use ambassador_core::StatKind;
    use bigdecimal::BigDecimal;
    use axum::Json;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use jiff::civil::date;
    use serde_json::{Value, json};

    use super::*;
    use crate::service::fixtures;

    #[tokio::test]
    async fn test_dashboard_fetches_the_two_day_window() {
        let router = axum::Router::new()
            .route(
                "/api/withdrawals",
                get(|Query(query): Query<Value>| async move {
                    assert_eq!(query["startDate"], "2024-05-01");
                    assert_eq!(query["endDate"], "2024-05-02");
                    Json(json!({ "data": [
                        { "id": 1, "statusID": 1, "amount": "30", "createdDate": "2024-05-02T10:00:00" }
                    ] }))
                }),
            )
            .route(
                "/api/deposit-records",
                get(|| async { Json(json!([])) }),
            )
            .route(
                "/api/customers",
                get(|| async {
                    Json(json!({ "data": [
                        { "id": 1, "createdDate": "2024-05-01T08:00:00", "totalRowsCount": 42 }
                    ] }))
                }),
            );
        let host = fixtures::serve(router).await;

        let summary = fixtures::client(&host)
            .dashboard(date(2024, 5, 2))
            .await
            .unwrap();

        let pending = summary.card(StatKind::PendingWithdrawal).unwrap();
        assert_eq!(pending.today, 1);
        let customers = summary.card(StatKind::Customer).unwrap();
        assert_eq!(customers.total, BigDecimal::from(42));
    }

    #[tokio::test]
    async fn test_dashboard_fails_when_any_list_fails() {
        let router = axum::Router::new()
            .route("/api/withdrawals", get(|| async { Json(json!([])) }))
            .route(
                "/api/deposit-records",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/api/customers", get(|| async { Json(json!([])) }));
        let host = fixtures::serve(router).await;

        let error = fixtures::client(&host)
            .dashboard(date(2024, 5, 2))
            .await
            .unwrap_err();
        assert_eq!(error.status(), 500);
    }
}
