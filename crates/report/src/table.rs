#![allow(clippy::format_push_string)]

use rust_decimal::Decimal;

use crate::rows::{column_headers, max_outcomes, ReportRow};

const RULE_HEAVY: char = '═';
const RULE_LIGHT: char = '─';
const COLUMN_GAP: &str = "  ";

pub struct TableFormatter;

impl TableFormatter {
    /// Renders rows as a fixed-width text table followed by totals.
    #[must_use]
    pub fn format(rows: &[ReportRow]) -> String {
        let max = max_outcomes(rows);
        let headers = column_headers(max);
        let body: Vec<Vec<String>> = rows.iter().map(|row| row.cells(max)).collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let total_width =
            widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);

        let mut output = String::new();
        output.push('\n');
        output.push_str(&rule(RULE_HEAVY, total_width));
        output.push_str(&line(&headers, &widths));
        output.push_str(&rule(RULE_LIGHT, total_width));
        for cells in &body {
            output.push_str(&line(cells, &widths));
        }
        output.push_str(&rule(RULE_HEAVY, total_width));

        let total: Decimal = rows.iter().map(|row| row.expected_earnings).sum();
        output.push_str(&format!("Opportunities:         {}\n", rows.len()));
        output.push_str(&format!("Total Earnings:        {:.2}\n", total));
        if let Some(best) = rows.iter().max_by_key(|row| row.expected_earnings) {
            output.push_str(&format!(
                "Best:                  {} ({}) {:.2}\n",
                best.event_label, best.sport_key, best.expected_earnings
            ));
        }

        output
    }
}

fn rule(ch: char, width: usize) -> String {
    let mut s: String = std::iter::repeat(ch).take(width).collect();
    s.push('\n');
    s
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let mut s = padded.join(COLUMN_GAP).trim_end().to_string();
    s.push('\n');
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::tests::sample_results;
    use sports_arb_arbitrage::PriceFormat;

    #[test]
    fn test_format_contains_headers_and_rows() {
        let rows = ReportRow::from_results(&sample_results(), PriceFormat::Decimal);
        let output = TableFormatter::format(&rows);

        assert!(output.contains("Expected Earnings"));
        assert!(output.contains("Amount to Buy #3"));
        assert!(output.contains("nba-1"));
        assert!(output.contains("epl-1"));
        assert!(output.contains("49.40"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Opportunities:         2"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let rows = ReportRow::from_results(&sample_results(), PriceFormat::Decimal);
        let output = TableFormatter::format(&rows);

        let header = output.lines().find(|l| l.starts_with("ID")).unwrap();
        let row = output.lines().find(|l| l.starts_with("nba-1")).unwrap();
        assert_eq!(header.find("Sport Key"), row.find("basketball_nba"));
    }

    #[test]
    fn test_format_empty() {
        let output = TableFormatter::format(&[]);
        assert!(output.contains("Opportunities:         0"));
        assert!(!output.contains("Best:"));
    }
}
