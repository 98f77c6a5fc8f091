//! # Pipeline façade
//!
//! [`Parade`] owns the configuration, the observer, the oracle and the optional cache,
//! and runs the stages in order:
//!
//! ```text
//! cache.load(key) ─hit──────────────────────────────┐
//!        │ miss                                     ▼
//!        └─▶ extract days ─▶ sample altitudes ─▶ [rise/set] ─▶ cache.store ─▶ aggregate
//! ```
//!
//! Nothing is global: every collaborator is built from [`ParadeConfig`] or injected
//! with [`Parade::with_oracle`] / [`Parade::with_cache`].

use std::time::Instant;

use chrono_tz::Tz;

use crate::aggregation::{Aggregator, ConsolidatedTable};
use crate::cache::{CacheKey, DiskCache, TableCache};
use crate::config::ParadeConfig;
use crate::ephemeris::analytic::AnalyticEphemeris;
use crate::ephemeris::EphemerisOracle;
use crate::events::EventExtractor;
use crate::observers::Observer;
use crate::parade_errors::ParadeError;
use crate::progress::fmt_dur;
use crate::sampler::AltitudeSampler;
use crate::table::VisibilityTable;
use crate::time::DateRange;

/// Result of a full run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParadeOutcome {
    pub visibility: VisibilityTable,
    pub consolidated: ConsolidatedTable,
}

pub struct Parade<O: EphemerisOracle = AnalyticEphemeris> {
    config: ParadeConfig,
    observer: Observer,
    timezone: Tz,
    oracle: O,
    cache: Option<Box<dyn TableCache>>,
}

impl Parade<AnalyticEphemeris> {
    /// Pipeline backed by the analytic ephemeris.
    ///
    /// When `config.cache_enabled` is set, a [`DiskCache`] is opened in
    /// `config.cache_dir` (or the user cache directory).
    pub fn new(config: ParadeConfig) -> Result<Self, ParadeError> {
        Parade::with_oracle(config, AnalyticEphemeris::default())
    }
}

impl<O: EphemerisOracle> Parade<O> {
    pub fn with_oracle(config: ParadeConfig, oracle: O) -> Result<Self, ParadeError> {
        config.validate()?;
        let observer = config.observer()?;
        let timezone = config.tz()?;

        let cache: Option<Box<dyn TableCache>> = if config.cache_enabled {
            let dir = match &config.cache_dir {
                Some(dir) => dir.clone(),
                None => DiskCache::default_dir()?,
            };
            Some(Box::new(DiskCache::new(dir)?))
        } else {
            None
        };

        Ok(Parade {
            config,
            observer,
            timezone,
            oracle,
            cache,
        })
    }

    /// Replace the cache.
    pub fn with_cache(mut self, cache: impl TableCache + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Disable loading and storing.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn config(&self) -> &ParadeConfig {
        &self.config
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn cache_key(&self, range: &DateRange) -> CacheKey {
        CacheKey::for_request(range, &self.config, self.config.cache_key_policy)
    }

    /// Run extraction and sampling, bypassing the cache.
    pub fn compute_table(&self, range: &DateRange) -> Result<VisibilityTable, ParadeError> {
        let bodies = self.config.tracked_bodies();

        let started = Instant::now();
        let days = EventExtractor::new(
            &self.oracle,
            &self.observer,
            self.timezone,
            self.config.dusk_offset(),
            self.config.pad_days,
        )?
        .extract(range)?;
        log::info!(
            "{} days extracted for {range} in {}",
            days.len(),
            fmt_dur(started.elapsed())
        );

        let sampler = AltitudeSampler::new(&self.oracle, &self.observer, &bodies);
        let mut table = sampler.sample(days)?;

        if self.config.record_rise_set {
            sampler.record_rise_set(
                &mut table,
                &range.padded(self.config.pad_days),
                &self.timezone,
            )?;
        }
        Ok(table)
    }

    /// Visibility table of `range`, from the cache when possible.
    ///
    /// A computed table is stored before being returned; a failed store is logged and
    /// does not fail the call.
    pub fn visibility_table(&self, range: &DateRange) -> Result<VisibilityTable, ParadeError> {
        let Some(cache) = &self.cache else {
            return self.compute_table(range);
        };

        let key = self.cache_key(range);
        if let Some(table) = cache.load(&key) {
            return Ok(table);
        }

        let table = self.compute_table(range)?;
        if let Err(e) = cache.store(&key, &table) {
            log::warn!("could not store visibility table {key}: {e}");
        }
        Ok(table)
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.config.treeline_degrees)
    }

    pub fn consolidated(&self, range: &DateRange) -> Result<ConsolidatedTable, ParadeError> {
        self.aggregator().aggregate(&self.visibility_table(range)?)
    }

    /// Full pipeline over the configured years.
    pub fn run(&self) -> Result<ParadeOutcome, ParadeError> {
        let range = self.config.date_range()?;
        log::info!(
            "planetary parade {range} at ({}, {}) in {}",
            self.observer.latitude,
            self.observer.longitude,
            self.timezone
        );

        let visibility = self.visibility_table(&range)?;
        let consolidated = self.aggregator().aggregate(&visibility)?;
        log::info!("{} days consolidated", consolidated.len());

        Ok(ParadeOutcome {
            visibility,
            consolidated,
        })
    }
}
