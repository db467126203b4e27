use std::io::Write;

use serde::Serialize;
use sss_core::{StockMetrics, Symbol};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// A single figure picked out of a [`StockMetrics`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Price,
    DividendYield,
    PeRatio,
}

impl Metric {
    const fn key(self) -> &'static str {
        match self {
            Self::Price => "stock_price",
            Self::DividendYield => "dividend_yield",
            Self::PeRatio => "pe_ratio",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Price => "Stock price",
            Self::DividendYield => "Dividend yield",
            Self::PeRatio => "P/E ratio",
        }
    }

    fn value(self, metrics: &StockMetrics) -> f64 {
        match self {
            Self::Price => metrics.stock_price,
            Self::DividendYield => metrics.dividend_yield,
            Self::PeRatio => metrics.pe_ratio,
        }
    }
}

#[derive(Debug, Serialize)]
struct MetricLine<'a> {
    symbol: &'a Symbol,
    metric: &'static str,
    value: f64,
    available: bool,
}

#[derive(Debug, Serialize)]
struct MetricsLine<'a> {
    #[serde(flatten)]
    metrics: &'a StockMetrics,
    available: bool,
}

#[derive(Debug, Serialize)]
struct IndexLine {
    all_share_index: f64,
    available: bool,
}

pub fn write_metric<W: Write>(
    out: &mut W,
    format: OutputFormat,
    metrics: &StockMetrics,
    metric: Metric,
    decay_seconds: f64,
) -> Result<(), CliError> {
    let value = metric.value(metrics);

    match format {
        OutputFormat::Json => {
            let line = MetricLine {
                symbol: &metrics.symbol,
                metric: metric.key(),
                value,
                available: value != 0.0,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
        OutputFormat::Text if metrics.stock_price == 0.0 => {
            write_no_trades(out, decay_seconds)?;
        }
        OutputFormat::Text if metric == Metric::PeRatio && metrics.dividend_yield == 0.0 => {
            write_pe_unavailable(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}: {value}", metric.label())?;
        }
    }

    Ok(())
}

pub fn write_metrics<W: Write>(
    out: &mut W,
    format: OutputFormat,
    metrics: &StockMetrics,
    decay_seconds: f64,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let line = MetricsLine {
                metrics,
                available: metrics.stock_price != 0.0,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
        OutputFormat::Text if metrics.stock_price == 0.0 => {
            write_no_trades(out, decay_seconds)?;
        }
        OutputFormat::Text => {
            for metric in [Metric::Price, Metric::DividendYield] {
                writeln!(out, "{}: {}", metric.label(), metric.value(metrics))?;
            }
            if metrics.dividend_yield == 0.0 {
                write_pe_unavailable(out)?;
            } else {
                writeln!(out, "{}: {}", Metric::PeRatio.label(), metrics.pe_ratio)?;
            }
            writeln!(out, "Trades in window: {}", metrics.trade_count)?;
        }
    }

    Ok(())
}

pub fn write_index<W: Write>(out: &mut W, format: OutputFormat, index: f64) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let line = IndexLine {
                all_share_index: index,
                available: index != 0.0,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
        OutputFormat::Text if index == 0.0 => {
            writeln!(out, "GBCE All Share Index is not available: no stock has recent trades")?;
        }
        OutputFormat::Text => {
            writeln!(out, "GBCE All Share Index: {index}")?;
        }
    }

    Ok(())
}

fn write_pe_unavailable<W: Write>(out: &mut W) -> Result<(), CliError> {
    writeln!(out, "P/E ratio is not available: dividend yield is zero")?;
    Ok(())
}

fn write_no_trades<W: Write>(out: &mut W, decay_seconds: f64) -> Result<(), CliError> {
    writeln!(out, "No trades in the last {decay_seconds} seconds")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(stock_price: f64, dividend_yield: f64, pe_ratio: f64) -> StockMetrics {
        StockMetrics {
            symbol: Symbol::parse("POP").expect("valid symbol"),
            as_of: 1_700_000_000.0,
            trade_count: 2,
            stock_price,
            dividend_yield,
            pe_ratio,
        }
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), CliError>) -> String {
        let mut out = Vec::new();
        write(&mut out).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn text_metric_uses_label() {
        let text = render(|out| {
            write_metric(out, OutputFormat::Text, &metrics(10.0, 0.2, 50.0), Metric::PeRatio, 900.0)
        });
        assert_eq!(text, "P/E ratio: 50\n");
    }

    #[test]
    fn zero_price_reads_as_no_trades() {
        let text = render(|out| {
            write_metric(out, OutputFormat::Text, &metrics(0.0, 0.0, 0.0), Metric::DividendYield, 900.0)
        });
        assert_eq!(text, "No trades in the last 900 seconds\n");
    }

    #[test]
    fn zero_yield_pe_is_explained() {
        let text = render(|out| {
            write_metric(out, OutputFormat::Text, &metrics(10.0, 0.0, 0.0), Metric::PeRatio, 900.0)
        });
        assert_eq!(text, "P/E ratio is not available: dividend yield is zero\n");
    }

    #[test]
    fn json_metric_flags_availability() {
        let text = render(|out| {
            write_metric(out, OutputFormat::Json, &metrics(0.0, 0.0, 0.0), Metric::Price, 900.0)
        });
        let value: serde_json::Value = serde_json::from_str(&text).expect("json line");
        assert_eq!(value["symbol"], "POP");
        assert_eq!(value["metric"], "stock_price");
        assert_eq!(value["available"], false);
    }

    #[test]
    fn json_metrics_serializes_snapshot() {
        let text = render(|out| write_metrics(out, OutputFormat::Json, &metrics(10.0, 0.2, 50.0), 900.0));
        let value: serde_json::Value = serde_json::from_str(&text).expect("json line");
        assert_eq!(value["stock_price"], 10.0);
        assert_eq!(value["trade_count"], 2);
        assert_eq!(value["available"], true);
    }

    #[test]
    fn json_metrics_flags_missing_price() {
        let text = render(|out| write_metrics(out, OutputFormat::Json, &metrics(0.0, 0.0, 0.0), 900.0));
        let value: serde_json::Value = serde_json::from_str(&text).expect("json line");
        assert_eq!(value["symbol"], "POP");
        assert_eq!(value["available"], false);
    }

    #[test]
    fn text_metrics_explain_zero_yield_pe() {
        let text = render(|out| write_metrics(out, OutputFormat::Text, &metrics(10.0, 0.0, 0.0), 900.0));
        assert_eq!(
            text,
            "Stock price: 10\nDividend yield: 0\nP/E ratio is not available: dividend yield is zero\nTrades in window: 2\n"
        );
    }

    #[test]
    fn index_lines() {
        assert_eq!(
            render(|out| write_index(out, OutputFormat::Text, 6.0)),
            "GBCE All Share Index: 6\n"
        );
        assert_eq!(
            render(|out| write_index(out, OutputFormat::Text, 0.0)),
            "GBCE All Share Index is not available: no stock has recent trades\n"
        );
    }
}
