//! Best-price normalization.
//!
//! Collapses every bookmaker's head-to-head prices for one event into the
//! single highest price per distinct outcome.

use std::collections::HashMap;

use sports_arb_core::RawEvent;
use tracing::trace;

use crate::canonical::OutcomeCanonicalizer;
use crate::types::{BestPriceEntry, BestPriceTable};

/// Reduces a [`RawEvent`] to its [`BestPriceTable`].
#[derive(Debug, Clone, Default)]
pub struct OddsNormalizer {
    canonicalizer: OutcomeCanonicalizer,
}

impl OddsNormalizer {
    /// Creates a normalizer that matches outcome labels exactly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer that canonicalizes outcome labels first.
    #[must_use]
    pub fn with_canonicalizer(canonicalizer: OutcomeCanonicalizer) -> Self {
        Self { canonicalizer }
    }

    #[must_use]
    pub fn canonicalizer(&self) -> &OutcomeCanonicalizer {
        &self.canonicalizer
    }

    /// Builds the best-price table for one event.
    ///
    /// Only each bookmaker's first market is read. A repeated outcome label
    /// replaces the stored entry only when its price is strictly higher, so
    /// ties keep the first bookmaker seen and entry order never changes.
    #[must_use]
    pub fn normalize(&self, event: &RawEvent) -> BestPriceTable {
        let mut entries: Vec<BestPriceEntry> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for bookmaker in &event.bookmakers {
            let Some(market) = bookmaker.primary_market() else {
                trace!(
                    event_id = %event.id,
                    bookmaker = %bookmaker.title,
                    "Bookmaker has no markets"
                );
                continue;
            };

            for outcome in &market.outcomes {
                let name = self.canonicalizer.canonicalize(&outcome.name);

                match index.get(name.as_ref()) {
                    Some(&i) => {
                        let best = &mut entries[i];
                        if outcome.price > best.price {
                            trace!(
                                event_id = %event.id,
                                outcome = %best.outcome,
                                old_price = %best.price,
                                new_price = %outcome.price,
                                bookmaker = %bookmaker.title,
                                "Better price found"
                            );
                            best.bookmaker.clone_from(&bookmaker.title);
                            best.price = outcome.price;
                        }
                    }
                    None => {
                        index.insert(name.to_string(), entries.len());
                        entries.push(BestPriceEntry::new(
                            bookmaker.title.as_str(),
                            name.as_ref(),
                            outcome.price,
                        ));
                    }
                }
            }
        }

        BestPriceTable::new(entries)
    }
}
