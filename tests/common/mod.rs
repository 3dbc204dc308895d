#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use budget_wise::core::LedgerManager;
use wise_core::FixedClock;
use wise_domain::start_of_day;
use wise_storage_json::{JsonLedgerStore, StoragePaths};

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    start_of_day(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

pub fn json_store(dir: &TempDir) -> JsonLedgerStore {
    JsonLedgerStore::with_retention(StoragePaths::under(&dir.path().join("data")), 3)
        .expect("create json store")
}

/// Opens a session over a JSON store inside `dir`, pinned to `now`.
pub fn open_manager(dir: &TempDir, now: NaiveDateTime) -> LedgerManager {
    LedgerManager::open(Box::new(json_store(dir)), Box::new(FixedClock(now)))
        .expect("open ledger manager")
}
