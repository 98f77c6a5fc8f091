mod common;

use std::collections::BTreeMap;
use std::fs;

use camino::Utf8Path;
use planetary_parade::{
    Body, CacheKeyPolicy, Checkpoint, DateRange, DayRecord, DiskCache, Parade, ParadeConfig,
    ParadeError, TableCache, VisibilityTable,
};
use tempfile::TempDir;

use crate::common::{date, test_config, wavy, ScriptedOracle};

fn oracle() -> ScriptedOracle {
    ScriptedOracle::new(date(2020, 12, 1), date(2021, 3, 1), wavy)
}

fn range() -> DateRange {
    DateRange::new(date(2021, 1, 1), date(2021, 1, 15)).unwrap()
}

fn utf8(dir: &TempDir) -> &Utf8Path {
    Utf8Path::from_path(dir.path()).unwrap()
}

#[test]
fn cached_and_direct_paths_agree() {
    let dir = tempfile::tempdir().unwrap();
    let cached = Parade::with_oracle(test_config(Some(utf8(&dir))), oracle()).unwrap();
    let direct = Parade::with_oracle(test_config(None), oracle()).unwrap();

    let first = cached.consolidated(&range()).unwrap();
    let calls_after_first = cached.oracle().calls();
    let second = cached.consolidated(&range()).unwrap();

    // Second request is served from disk
    assert_eq!(cached.oracle().calls(), calls_after_first);
    assert_eq!(first, second);
    assert_eq!(first, direct.consolidated(&range()).unwrap());
    assert_eq!(
        cached.visibility_table(&range()).unwrap(),
        direct.visibility_table(&range()).unwrap()
    );
}

#[test]
fn range_only_policy_shares_tables_between_observers() {
    let dir = tempfile::tempdir().unwrap();
    let here = ParadeConfig {
        cache_key_policy: CacheKeyPolicy::RangeOnly,
        ..test_config(Some(utf8(&dir)))
    };
    let elsewhere = ParadeConfig {
        latitude: 48.85,
        longitude: 2.35,
        ..here.clone()
    };

    let a = Parade::with_oracle(here, oracle()).unwrap();
    let b = Parade::with_oracle(elsewhere, oracle()).unwrap();
    assert_eq!(a.cache_key(&range()), b.cache_key(&range()));

    let table_a = a.visibility_table(&range()).unwrap();
    let table_b = b.visibility_table(&range()).unwrap();
    assert_eq!(table_a, table_b);
    assert_eq!(b.oracle().calls(), 0);
}

#[test]
fn full_policy_keeps_observers_apart() {
    let dir = tempfile::tempdir().unwrap();
    let here = test_config(Some(utf8(&dir)));
    let elsewhere = ParadeConfig {
        latitude: 48.85,
        longitude: 2.35,
        ..here.clone()
    };

    let a = Parade::with_oracle(here, oracle()).unwrap();
    let b = Parade::with_oracle(elsewhere, oracle()).unwrap();
    assert_ne!(a.cache_key(&range()), b.cache_key(&range()));

    let table_a = a.visibility_table(&range()).unwrap();
    let table_b = b.visibility_table(&range()).unwrap();
    assert_ne!(table_a, table_b);
    assert!(b.oracle().calls() > 0);
}

#[test]
fn treeline_is_part_of_the_full_key() {
    let dir = tempfile::tempdir().unwrap();
    let low = test_config(Some(utf8(&dir)));
    let high = ParadeConfig {
        treeline_degrees: 25.0,
        ..low.clone()
    };
    let a = Parade::with_oracle(low, oracle()).unwrap();
    let b = Parade::with_oracle(high, oracle()).unwrap();
    assert_ne!(a.cache_key(&range()), b.cache_key(&range()));
}

#[test]
fn corrupt_artifact_is_recomputed() {
    let dir = tempfile::tempdir().unwrap();
    let parade = Parade::with_oracle(test_config(Some(utf8(&dir))), oracle()).unwrap();
    let cache = DiskCache::new(utf8(&dir)).unwrap();
    let key = parade.cache_key(&range());

    fs::write(cache.path_for(&key), b"\x00\x01 definitely not json").unwrap();
    let table = parade.visibility_table(&range()).unwrap();
    assert!(parade.oracle().calls() > 0);
    assert_eq!(table.len(), 14);

    // The broken artifact has been replaced
    assert_eq!(cache.load(&key), Some(table));
}

#[test]
fn failed_store_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = utf8(&dir).join("gone");
    let parade = Parade::with_oracle(test_config(Some(cache_dir.as_path())), oracle()).unwrap();
    fs::remove_dir_all(&cache_dir).unwrap();

    let table = parade.visibility_table(&range()).unwrap();
    assert_eq!(table.len(), 14);
}

#[test]
fn disabled_cache_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let parade = Parade::with_oracle(test_config(Some(utf8(&dir))), oracle())
        .unwrap()
        .without_cache();
    parade.visibility_table(&range()).unwrap();
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn stale_artifact_missing_altitudes_is_a_column_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let parade = Parade::with_oracle(test_config(Some(utf8(&dir))), oracle()).unwrap();
    let cache = DiskCache::new(utf8(&dir)).unwrap();

    // Build a table that claims to track Mars but never sampled it
    let full = parade.visibility_table(&range()).unwrap();
    let mut days = BTreeMap::new();
    for (date, record) in full.days() {
        let mut partial = DayRecord::new(record.events);
        for checkpoint in Checkpoint::ALL {
            let alt = record.altitude(Body::Venus, checkpoint).unwrap();
            partial.set_altitude(Body::Venus, checkpoint, alt);
        }
        days.insert(*date, partial);
    }
    let stale = VisibilityTable::new(vec![Body::Venus, Body::Mars], days);
    cache.store(&parade.cache_key(&range()), &stale).unwrap();

    assert!(matches!(
        parade.consolidated(&range()),
        Err(ParadeError::ColumnMismatch {
            body: Body::Mars,
            checkpoint: Checkpoint::Morning,
            ..
        })
    ));
}
