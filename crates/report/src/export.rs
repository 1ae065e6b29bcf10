use anyhow::{Context, Result};
use csv::Writer;
use sports_arb_arbitrage::ArbitrageResult;
use tracing::debug;

use crate::rows::{column_headers, max_outcomes, ReportRow};

/// Serializes rows as CSV bytes, header first.
///
/// # Errors
/// Returns error if a record cannot be written.
pub fn export_csv(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let max = max_outcomes(rows);
    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(column_headers(max))?;
    for row in rows {
        writer.write_record(row.cells(max))?;
    }

    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV export: {}", e.error()))?;

    debug!(rows = rows.len(), bytes = bytes.len(), "Exported CSV");
    Ok(bytes)
}

/// Serializes full results as pretty-printed JSON bytes.
///
/// # Errors
/// Returns error if serialization fails.
pub fn export_json(results: &[ArbitrageResult]) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(results).context("Failed to serialize results")?;
    debug!(results = results.len(), bytes = bytes.len(), "Exported JSON");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::tests::sample_results;
    use sports_arb_arbitrage::PriceFormat;

    #[test]
    fn test_export_csv_layout() {
        let rows = ReportRow::from_results(&sample_results(), PriceFormat::Decimal);
        let bytes = export_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID,Sport Key,Expected Earnings,Bookmaker #1,Name #1,Odds #1,Amount to Buy #1"));
        assert!(lines[0].ends_with("Amount to Buy #3"));
        assert!(lines[1].starts_with("nba-1,basketball_nba,3.73,Book A,Team X,2.1,49.40"));
        assert!(lines[1].ends_with("N/A,N/A,N/A,N/A"));
        assert!(lines[2].starts_with("epl-1,soccer_epl,"));
    }

    #[test]
    fn test_export_csv_reads_back() {
        let rows = ReportRow::from_results(&sample_results(), PriceFormat::American);
        let bytes = export_csv(&rows).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(headers.len(), 15);
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][5], "+110.00");
    }

    #[test]
    fn test_export_csv_empty() {
        let bytes = export_csv(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().trim(), "ID,Sport Key,Expected Earnings");
    }

    #[test]
    fn test_export_json() {
        let results = sample_results();
        let bytes = export_json(&results).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["event_id"], "nba-1");
        assert_eq!(value[0]["best_prices"][0]["bookmaker"], "Book A");
        assert_eq!(value[1]["stakes"].as_array().unwrap().len(), 3);
    }
}
