//! Batch scanning over many events.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sports_arb_core::{RawEvent, ScanConfig};
use tracing::{debug, info, warn};

use crate::canonical::OutcomeCanonicalizer;
use crate::error::Result;
use crate::evaluator::ArbitrageEvaluator;
use crate::normalizer::OddsNormalizer;
use crate::types::ArbitrageResult;

// =============================================================================
// Scan Summary
// =============================================================================

/// Counters for one batch scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Events in the batch.
    pub events_scanned: u32,
    /// Events whose best-price table came out empty.
    pub events_without_outcomes: u32,
    /// Events dropped because evaluation failed.
    pub events_rejected: u32,
    /// Qualifying events.
    pub opportunities: u32,
    /// Opportunity with the highest expected profit.
    pub best_opportunity: Option<OpportunitySummary>,
    /// Sum of expected profit across all opportunities.
    pub total_expected_profit: Decimal,
}

impl ScanSummary {
    fn record(&mut self, result: &ArbitrageResult) {
        self.opportunities += 1;
        self.total_expected_profit += result.expected_profit;

        let better = self
            .best_opportunity
            .as_ref()
            .map_or(true, |best| result.expected_profit > best.expected_profit);
        if better {
            self.best_opportunity = Some(OpportunitySummary::from(result));
        }
    }
}

/// Short form of a single opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySummary {
    pub event_id: String,
    pub event_label: String,
    /// Margin below certainty, in percent.
    pub edge_pct: Decimal,
    pub expected_profit: Decimal,
}

impl From<&ArbitrageResult> for OpportunitySummary {
    fn from(result: &ArbitrageResult) -> Self {
        Self {
            event_id: result.event_id.clone(),
            event_label: result.event_label.clone(),
            edge_pct: result.edge_pct().round_dp(2),
            expected_profit: result.expected_profit,
        }
    }
}

// =============================================================================
// Batch Aggregator
// =============================================================================

/// Runs normalization and evaluation over a batch of events.
///
/// Events are processed sequentially and results keep the input order.
/// A failing event is logged and skipped; the batch never aborts.
#[derive(Debug, Clone)]
pub struct BatchAggregator {
    normalizer: OddsNormalizer,
    evaluator: ArbitrageEvaluator,
}

impl BatchAggregator {
    #[must_use]
    pub fn new(normalizer: OddsNormalizer, evaluator: ArbitrageEvaluator) -> Self {
        Self {
            normalizer,
            evaluator,
        }
    }

    /// Creates an aggregator for a bet size with exact outcome matching.
    ///
    /// # Errors
    /// Returns an error if `bet_size` is not positive.
    pub fn with_bet_size(bet_size: Decimal) -> Result<Self> {
        Ok(Self::new(
            OddsNormalizer::new(),
            ArbitrageEvaluator::new(bet_size)?,
        ))
    }

    /// Creates an aggregator from the scan section of the app config.
    ///
    /// # Errors
    /// Returns an error if the configured bet size is not positive.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let canonicalizer = OutcomeCanonicalizer::from_aliases(&config.outcome_aliases);
        Ok(Self::new(
            OddsNormalizer::with_canonicalizer(canonicalizer),
            ArbitrageEvaluator::new(config.bet_size)?,
        ))
    }

    #[must_use]
    pub fn evaluator(&self) -> &ArbitrageEvaluator {
        &self.evaluator
    }

    /// Normalizes and evaluates a single event.
    ///
    /// # Errors
    /// Propagates evaluation errors for this event.
    pub fn scan_event(&self, event: &RawEvent) -> Result<Option<ArbitrageResult>> {
        let table = self.normalizer.normalize(event);
        self.evaluator.evaluate(event, table)
    }

    /// Returns every qualifying event, in input order.
    #[must_use]
    pub fn scan(&self, events: &[RawEvent]) -> Vec<ArbitrageResult> {
        self.scan_with_summary(events).0
    }

    /// Like [`Self::scan`], also returning batch counters.
    #[must_use]
    pub fn scan_with_summary(&self, events: &[RawEvent]) -> (Vec<ArbitrageResult>, ScanSummary) {
        let mut results = Vec::new();
        let mut summary = ScanSummary::default();

        for event in events {
            summary.events_scanned += 1;

            let table = self.normalizer.normalize(event);
            if table.is_empty() {
                debug!(event_id = %event.id, "Event has no outcomes");
                summary.events_without_outcomes += 1;
                continue;
            }

            match self.evaluator.evaluate(event, table) {
                Ok(Some(result)) => {
                    summary.record(&result);
                    results.push(result);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        event_id = %event.id,
                        sport_key = %event.sport_key,
                        error = %e,
                        "Skipping event"
                    );
                    summary.events_rejected += 1;
                }
            }
        }

        info!(
            events_scanned = summary.events_scanned,
            opportunities = summary.opportunities,
            events_rejected = summary.events_rejected,
            total_expected_profit = %summary.total_expected_profit,
            "Scan complete"
        );

        (results, summary)
    }
}
