use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::domain::{Error, TimeDeposit, Withdrawal};
use crate::service::DepositService;
use crate::store::CsvStore;

/// Shared application state.
#[derive(Clone)]
struct AppState {
    service: Arc<Mutex<DepositService<CsvStore>>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDepositResponse {
    id: u32,
    plan_type: String,
    balance: Decimal,
    days: u32,
    withdrawals: Vec<WithdrawalResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    id: u32,
    time_deposit_id: u32,
    amount: Decimal,
    date: NaiveDate,
}

impl From<TimeDeposit> for TimeDepositResponse {
    fn from(deposit: TimeDeposit) -> Self {
        Self {
            id: deposit.id,
            plan_type: deposit.plan_type,
            balance: deposit.balance,
            days: deposit.days,
            withdrawals: deposit.withdrawals.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Withdrawal> for WithdrawalResponse {
    fn from(withdrawal: Withdrawal) -> Self {
        Self {
            id: withdrawal.id,
            time_deposit_id: withdrawal.time_deposit_id,
            amount: withdrawal.amount,
            date: withdrawal.date,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::UnknownPlanType(_) | Error::DuplicatePlanType(_) => StatusCode::BAD_REQUEST,
            Error::Store(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /api/time-deposits
async fn list_deposits(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimeDepositResponse>>, Error> {
    let service = state.service.lock().unwrap();
    let deposits = service.get_all_deposits()?;
    Ok(Json(deposits.into_iter().map(Into::into).collect()))
}

/// PUT /api/time-deposits/update-balances
///
/// Not idempotent: every call adds another month of interest on top of the
/// current balances.
async fn update_balances(State(state): State<AppState>) -> Result<StatusCode, Error> {
    let mut service = state.service.lock().unwrap();
    service.update_balances()?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router(service: DepositService<CsvStore>) -> Router {
    let state = AppState {
        service: Arc::new(Mutex::new(service)),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/time-deposits", get(list_deposits))
        .route("/time-deposits/update-balances", put(update_balances))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
