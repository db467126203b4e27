//! Line-oriented command shell over a [`StockManager`].
//!
//! The top level works on the whole market; `single <SYMBOL>` enters a
//! nested prompt bound to one stock until `quit`.

use std::io::{BufRead, Write};

use sss_core::{Clock, StockError, StockManager, Symbol};
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{self, Metric};

const BANNER: &str = "Super Simple Stocks simulation started.";
const RECORD_USAGE: &str = "Provide trade data in format: <quantity> <buy/sell> <price>";

const MARKET_HELP: &str = "\
Commands:
  single <SYMBOL>  operations with a single stock
  all              GBCE All Share Index (geometric mean of prices)
  list             registered stock symbols
  help             this message
  quit             quit the simulation";

const STOCK_HELP: &str = "\
Commands:
  record <quantity> <buy/sell> <price>  record a trade now
  price                                 volume-weighted stock price
  dividend                              dividend yield
  pe_ratio                              P/E ratio
  metrics                               price, yield and P/E together
  help                                  this message
  quit                                  back to all stocks";

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Shell<C> {
    manager: StockManager,
    clock: C,
    format: OutputFormat,
    selected: Option<Symbol>,
}

impl<C: Clock> Shell<C> {
    pub fn new(manager: StockManager, clock: C, format: OutputFormat) -> Self {
        Self {
            manager,
            clock,
            format,
            selected: None,
        }
    }

    #[cfg(test)]
    fn manager(&self) -> &StockManager {
        &self.manager
    }

    /// Read commands until `quit` at the top level or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<(), CliError> {
        writeln!(out, "{BANNER}")?;
        let mut lines = input.lines();

        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                debug!("end of input");
                return Ok(());
            };

            if self.dispatch(line.trim(), &mut out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn prompt(&self) -> String {
        match &self.selected {
            Some(symbol) => format!("{symbol}> "),
            None => String::from("> "),
        }
    }

    fn dispatch<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, CliError> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((command, args)) => (command, args.trim()),
            None => (line, ""),
        };

        match self.selected.clone() {
            Some(symbol) => self.stock_command(&symbol, command, args, out),
            None => self.market_command(command, args, out),
        }
    }

    fn market_command<W: Write>(
        &mut self,
        command: &str,
        args: &str,
        out: &mut W,
    ) -> Result<Flow, CliError> {
        match command {
            "single" => self.select(args, out)?,
            "all" => {
                let index = self.manager.all_share_index_at(self.clock.now());
                output::write_index(out, self.format, index)?;
            }
            "list" => {
                for symbol in self.manager.symbols() {
                    let stock = self.manager.get_stock(symbol.as_str())?;
                    writeln!(out, "{symbol} ({})", stock.kind())?;
                }
            }
            "help" => writeln!(out, "{MARKET_HELP}")?,
            "quit" => {
                writeln!(out, "Bye.")?;
                return Ok(Flow::Exit);
            }
            _ => writeln!(out, "*** Unknown syntax: {command}")?,
        }
        Ok(Flow::Continue)
    }

    fn select<W: Write>(&mut self, args: &str, out: &mut W) -> Result<(), CliError> {
        if args.is_empty() {
            writeln!(out, "Provide a stock symbol.")?;
            return Ok(());
        }

        match self.manager.get_stock(args) {
            Ok(stock) => {
                debug!(symbol = %stock.symbol(), "entered single stock shell");
                self.selected = Some(stock.symbol().clone());
            }
            Err(StockError::NotFound { symbol }) => {
                writeln!(out, "Stock \"{symbol}\" is not found")?;
            }
            Err(error) => return Err(error.into()),
        }
        Ok(())
    }

    fn stock_command<W: Write>(
        &mut self,
        symbol: &Symbol,
        command: &str,
        args: &str,
        out: &mut W,
    ) -> Result<Flow, CliError> {
        let now = self.clock.now();
        let format = self.format;
        let stock = self.manager.get_stock_mut(symbol.as_str())?;
        let decay_seconds = stock.trade_decay_seconds();

        match command {
            "price" | "dividend" | "pe_ratio" => {
                let metric = match command {
                    "price" => Metric::Price,
                    "dividend" => Metric::DividendYield,
                    _ => Metric::PeRatio,
                };
                let metrics = stock.metrics_at(now);
                output::write_metric(out, format, &metrics, metric, decay_seconds)?;
            }
            "metrics" => {
                let metrics = stock.metrics_at(now);
                output::write_metrics(out, format, &metrics, decay_seconds)?;
            }
            "record" => {
                let fields: Vec<&str> = args.split_whitespace().collect();
                let [quantity, side, price] = fields.as_slice() else {
                    writeln!(out, "{RECORD_USAGE}")?;
                    return Ok(Flow::Continue);
                };
                match stock.record_trade_text(now, quantity, side, price) {
                    Ok(_) => writeln!(out, "Recorded a trade")?,
                    Err(error) => {
                        warn!(%symbol, violations = error.violations().len(), "rejected trade");
                        writeln!(out, "{error}")?;
                    }
                }
            }
            "help" => writeln!(out, "{STOCK_HELP}")?,
            "quit" => {
                writeln!(out, "Quitting to all stocks")?;
                self.selected = None;
            }
            _ => writeln!(out, "*** Unknown syntax: {command}")?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use sss_core::{ManualClock, StockConfig};

    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    fn manager() -> StockManager {
        StockManager::from_configs([
            StockConfig::common("POP", 8.0, 100.0),
            StockConfig::preferred("GIN", 8.0, 2.0, 100.0),
            StockConfig::common("TEA", 0.0, 100.0),
        ])
        .expect("valid stocks")
    }

    fn session(clock: &ManualClock, format: OutputFormat, script: &str) -> Vec<String> {
        let mut shell = Shell::new(manager(), clock, format);
        let mut out = Vec::new();
        shell
            .run(Cursor::new(script.to_owned()), &mut out)
            .expect("session runs");
        String::from_utf8(out)
            .expect("utf8")
            .lines()
            .map(|line| strip_prompts(line).to_owned())
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn strip_prompts(mut line: &str) -> &str {
        while let Some(rest) = ["> ", "GIN> ", "POP> ", "TEA> "]
            .iter()
            .find_map(|prompt| line.strip_prefix(prompt))
        {
            line = rest;
        }
        line
    }

    fn index_line(output: Vec<u8>) -> String {
        let text = String::from_utf8(output).expect("utf8");
        text.lines()
            .map(strip_prompts)
            .find(|line| line.starts_with("GBCE"))
            .expect("index line")
            .to_owned()
    }

    #[test]
    fn records_trades_and_reads_metrics() {
        let clock = ManualClock::new(NOW);
        let lines = session(
            &clock,
            OutputFormat::Text,
            "single GIN\nrecord 5 buy 10\nprice\ndividend\npe_ratio\nquit\nquit\n",
        );

        assert_eq!(
            lines,
            vec![
                BANNER,
                "Recorded a trade",
                "Stock price: 10",
                "Dividend yield: 0.2",
                "P/E ratio: 50",
                "Quitting to all stocks",
                "Bye.",
            ]
        );
    }

    #[test]
    fn reports_unknown_and_missing_symbols() {
        let clock = ManualClock::new(NOW);
        let lines = session(&clock, OutputFormat::Text, "single\nsingle XYZ\nbogus\nquit\n");

        assert_eq!(
            lines,
            vec![
                BANNER,
                "Provide a stock symbol.",
                "Stock \"XYZ\" is not found",
                "*** Unknown syntax: bogus",
                "Bye.",
            ]
        );
    }

    #[test]
    fn record_requires_three_fields() {
        let clock = ManualClock::new(NOW);
        let lines = session(&clock, OutputFormat::Text, "single POP\nrecord 5 buy\n");
        assert_eq!(lines, vec![BANNER, RECORD_USAGE]);
    }

    #[test]
    fn invalid_trade_prints_every_violation() {
        let clock = ManualClock::new(NOW);
        let lines = session(&clock, OutputFormat::Text, "single POP\nrecord 0 BUY -1\n");

        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("quantity should be a positive integer"));
        assert!(lines[2].starts_with("side should be one of"));
        assert!(lines[3].starts_with("price should be a positive number"));
    }

    #[test]
    fn index_follows_the_clock() {
        let clock = ManualClock::new(NOW);
        let mut shell = Shell::new(manager(), &clock, OutputFormat::Text);
        let mut out = Vec::new();
        shell
            .run(
                Cursor::new("single POP\nrecord 1 buy 4\nquit\nsingle TEA\nrecord 1 sell 9\nquit\n"),
                &mut out,
            )
            .expect("session runs");

        let mut out = Vec::new();
        shell.run(Cursor::new("all\n"), &mut out).expect("session runs");
        let index: f64 = index_line(out)
            .trim_start_matches("GBCE All Share Index: ")
            .parse()
            .expect("numeric index");
        assert!((index - 6.0).abs() < 1e-9);

        clock.advance(901.0);
        let mut out = Vec::new();
        shell.run(Cursor::new("all\n"), &mut out).expect("session runs");
        assert!(index_line(out).starts_with("GBCE All Share Index is not available"));
        assert!(shell
            .manager()
            .get_stock("POP")
            .expect("registered")
            .trades()
            .is_empty());
    }

    #[test]
    fn json_format_emits_objects() {
        let clock = ManualClock::new(NOW);
        let lines = session(&clock, OutputFormat::Json, "single POP\nmetrics\n");
        let value: serde_json::Value = serde_json::from_str(&lines[1]).expect("json line");
        assert_eq!(value["symbol"], "POP");
        assert_eq!(value["stock_price"], 0.0);
        assert_eq!(value["available"], false);
    }

    #[test]
    fn lists_symbols_with_kind() {
        let clock = ManualClock::new(NOW);
        let lines = session(&clock, OutputFormat::Text, "list\n");
        assert_eq!(
            lines,
            vec![BANNER, "GIN (preferred)", "POP (common)", "TEA (common)"]
        );
    }
}
