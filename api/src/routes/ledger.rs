use actix_web::{
    get,
    web::Query,
    HttpResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use xerror::api::*;

use core_types::LedgerStats;
use models::midnight_transactions::MidnightTransaction;

use crate::jwt::*;
use crate::{WebDbPool, WebStatsCache};

const DEFAULT_TX_LIMIT: i64 = 50;
const MAX_TX_LIMIT: i64 = 500;

#[derive(Deserialize, Debug)]
pub struct LedgerTxParams {
    pub limit: Option<i64>,
}

#[get("/ledger/txs")]
pub async fn get_ledger_txs(
    pool: WebDbPool,
    _auth_data: AuthData,
    query: Query<LedgerTxParams>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let limit = query.limit.unwrap_or(DEFAULT_TX_LIMIT).clamp(1, MAX_TX_LIMIT);

    let txs = MidnightTransaction::get_latest(&conn, limit).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&txs))
}

#[get("/ledger/stats")]
pub async fn get_ledger_stats(
    pool: WebDbPool,
    stats_cache: WebStatsCache,
    _auth_data: AuthData,
) -> Result<HttpResponse, ApiError> {
    if let Some(stats) = stats_cache.read().await.get_fresh() {
        return Ok(HttpResponse::Ok().json(&stats));
    }

    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let total = MidnightTransaction::count(&conn).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;
    let shielded = MidnightTransaction::count_shielded(&conn).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;
    let total_value = MidnightTransaction::total_value(&conn)
        .map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?
        .map(|value| Decimal::from_str(&value.to_string()).unwrap_or_default())
        .unwrap_or_default();

    let stats = LedgerStats::new(total.max(0) as u64, shielded.max(0) as u64, total_value);

    stats_cache.write().await.set(stats);

    Ok(HttpResponse::Ok().json(&stats))
}
