use crate::odds::RawEvent;
use anyhow::Result;
use async_trait::async_trait;

/// Supplies a snapshot of upcoming events with their bookmaker odds.
#[async_trait]
pub trait OddsSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<RawEvent>>;
    fn name(&self) -> &str;
}
