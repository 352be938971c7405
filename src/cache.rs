//! Memoized derivations
//!
//! Derived views are recomputed on read and memoized against the full input
//! tuple: ledger identity and revision, display currency, window length and the calendar
//! month of "today". A new month is a new key, so a memoized view never
//! outlives the month it was computed in.

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use crate::models::{CurrencyCode, LedgerSnapshot, Month};
use crate::reports::{AnalyticsReport, BudgetStatusReport, OverviewReport};
use crate::services::period::clamp_period;
use crate::services::CurrencyConverter;

/// Single-slot memo: holds the value for the most recent key only
#[derive(Debug)]
struct Memo<K, V> {
    slot: RwLock<Option<(K, Arc<V>)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<K: PartialEq + Clone + std::fmt::Debug, V> Memo<K, V> {
    fn get_or_compute(&self, view: &'static str, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Ok(slot) = self.slot.read() {
            if let Some((cached_key, value)) = slot.as_ref() {
                if *cached_key == key {
                    tracing::debug!(view, ?key, "derivation cache hit");
                    return Arc::clone(value);
                }
            }
        }

        tracing::debug!(view, ?key, "derivation cache miss");
        let value = Arc::new(compute());
        // A poisoned slot only loses memoization
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some((key, Arc::clone(&value)));
        }
        value
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AnalyticsKey {
    ledger_id: u64,
    revision: u64,
    currency: CurrencyCode,
    period: u32,
    month: Month,
}

#[derive(Debug, Clone, PartialEq)]
struct BudgetKey {
    ledger_id: u64,
    revision: u64,
    month: Month,
}

#[derive(Debug, Clone, PartialEq)]
struct OverviewKey {
    ledger_id: u64,
    revision: u64,
    currency: CurrencyCode,
    recent_count: usize,
    month: Month,
}

/// Memoizing front for the derivation engine
#[derive(Debug, Default)]
pub struct DerivationCache {
    converter: CurrencyConverter,
    analytics: Memo<AnalyticsKey, AnalyticsReport>,
    budgets: Memo<BudgetKey, BudgetStatusReport>,
    overview: Memo<OverviewKey, OverviewReport>,
}

impl DerivationCache {
    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    /// Analytics for `snapshot`, reused while the inputs are unchanged
    pub fn analytics(
        &self,
        snapshot: &LedgerSnapshot,
        display_currency: &CurrencyCode,
        period: u32,
        today: NaiveDate,
    ) -> Arc<AnalyticsReport> {
        let key = AnalyticsKey {
            ledger_id: snapshot.ledger_id,
            revision: snapshot.revision,
            currency: display_currency.clone(),
            period: clamp_period(period),
            month: Month::of(today),
        };
        self.analytics.get_or_compute("analytics", key, || {
            AnalyticsReport::generate(snapshot, &self.converter, display_currency, period, today)
        })
    }

    /// Budget status for `snapshot`
    pub fn budget_status(&self, snapshot: &LedgerSnapshot, today: NaiveDate) -> Arc<BudgetStatusReport> {
        let key = BudgetKey {
            ledger_id: snapshot.ledger_id,
            revision: snapshot.revision,
            month: Month::of(today),
        };
        self.budgets.get_or_compute("budget_status", key, || {
            BudgetStatusReport::generate(snapshot, today)
        })
    }

    /// Dashboard overview for `snapshot`
    pub fn overview(
        &self,
        snapshot: &LedgerSnapshot,
        display_currency: &CurrencyCode,
        recent_count: usize,
        today: NaiveDate,
    ) -> Arc<OverviewReport> {
        let key = OverviewKey {
            ledger_id: snapshot.ledger_id,
            revision: snapshot.revision,
            currency: display_currency.clone(),
            recent_count,
            month: Month::of(today),
        };
        self.overview.get_or_compute("overview", key, || {
            OverviewReport::generate(
                snapshot,
                &self.converter,
                display_currency,
                recent_count,
                today,
            )
        })
    }
}
