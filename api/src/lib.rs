use actix_cors::Cors;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, PgConnection};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

use core_types::{DbPool, LedgerStats, UserId};
use utils::xzmq::SocketContext;

pub mod comms;
pub mod jwt;
pub mod routes;

use comms::*;

#[derive(Serialize, Deserialize, Clone)]
pub struct ApiSettings {
    psql_url: String,
    api_zmq_push_address: String,
    api_zmq_subscribe_address: String,
    admin_uids: Vec<UserId>,
}

/// How long computed ledger stats stay fresh without being invalidated.
const STATS_TTL_SECS: u64 = 30;

pub struct LedgerStatsCache {
    pub stats: Option<LedgerStats>,
    pub last_updated: std::time::Instant,
}

impl LedgerStatsCache {
    /// Dropping the cached value forces the next stats read to hit the database.
    pub fn invalidate(&mut self) {
        self.stats = None;
    }

    pub fn set(&mut self, stats: LedgerStats) {
        self.stats = Some(stats);
        self.last_updated = std::time::Instant::now();
    }

    pub fn get_fresh(&self) -> Option<LedgerStats> {
        let stats = self.stats?;
        if self.last_updated.elapsed().as_secs() > STATS_TTL_SECS {
            return None;
        }
        Some(stats)
    }
}

impl Default for LedgerStatsCache {
    fn default() -> Self {
        Self {
            stats: None,
            last_updated: std::time::Instant::now(),
        }
    }
}

pub type WebDbPool = web::Data<DbPool>;
pub type WebSender = web::Data<mpsc::Sender<Envelope>>;
pub type WebStatsCache = web::Data<Arc<RwLock<LedgerStatsCache>>>;

pub async fn start(settings: ApiSettings) -> std::io::Result<()> {
    let endpoint = env::var("ENDPOINT").unwrap_or("127.0.0.1:8080".to_string());
    let pool = r2d2::Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(settings.psql_url.clone()))
        .expect("Failed to create pool.");

    {
        let conn = pool.get().expect("Failed to get DB connection to initialize models");
        models::init(&conn).expect("Failed to initialize models");
    }

    let (tx, rx) = mpsc::channel(1024);

    let context = SocketContext::new();
    let subscriber = context.create_subscriber(&settings.api_zmq_subscribe_address);
    let pusher = context.create_push(&settings.api_zmq_push_address);

    tokio::task::spawn(CommsActor::start(tx.clone(), rx, subscriber, pusher, settings.clone()));

    let admin_uids: HashSet<UserId> = settings.admin_uids.iter().copied().collect();

    let stats_cache = Arc::new(RwLock::new(LedgerStatsCache::default()));

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(tx.clone()))
            .app_data(Data::new(stats_cache.clone()))
            .app_data(Data::new(admin_uids.clone()))
            .service(routes::auth::create)
            .service(routes::auth::auth)
            .service(routes::auth::whoami)
            .service(routes::auth::refresh)
            .service(routes::profile::get_profile)
            .service(routes::profile::update_profile)
            .service(routes::profile::export_identities)
            .service(routes::aid_requests::get_aid_requests)
            .service(routes::aid_requests::create_aid_request)
            .service(routes::aid_requests::update_aid_request_status)
            .service(routes::tokens::get_tokens)
            .service(routes::tokens::create_token)
            .service(routes::tokens::get_token_balance)
            .service(routes::aid_tokens::get_aid_tokens)
            .service(routes::aid_tokens::create_aid_token)
            .service(routes::distributions::get_distributions)
            .service(routes::distributions::create_distribution)
            .service(routes::verifications::get_verifications)
            .service(routes::verifications::create_verification)
            .service(routes::verifications::get_verifiers)
            .service(routes::verifications::apply_as_verifier)
            .service(routes::verifications::get_verifier_applications)
            .service(routes::admin::approve_verifier_application)
            .service(routes::ledger::get_ledger_txs)
            .service(routes::ledger::get_ledger_stats)
            .service(routes::reports::get_reports)
            .service(routes::reports::create_report)
    })
    .bind(endpoint)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn invalidation_clears_cached_stats() {
        let mut cache = LedgerStatsCache::default();
        assert!(cache.get_fresh().is_none());

        cache.set(LedgerStats::new(10, 5, dec!(2500)));
        assert!(cache.get_fresh().is_some());

        cache.invalidate();
        assert!(cache.get_fresh().is_none());
    }

    #[test]
    fn set_refreshes_the_clock() {
        let mut cache = LedgerStatsCache::default();
        cache.set(LedgerStats::new(1, 1, dec!(1)));
        let stats = cache.get_fresh().unwrap();
        assert_eq!(stats.total_transactions, 1);
        assert_eq!(stats.privacy_rate, dec!(100));
    }
}
