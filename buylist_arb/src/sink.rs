//! CSV output of arbitrage opportunities

use crate::error::{ArbError, Result};
use crate::models::ArbitrageResult;
use std::io::Write;

const HEADER: [&str; 8] = [
    "URL",
    "Name",
    "Set",
    "Foil",
    "Buylist Price",
    "CS Price",
    "Arb",
    "Spread",
];

/// Single writer for result rows; the header goes out with the first row
pub struct ResultSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    rows: usize,
}

impl<W: Write> ResultSink<W> {
    pub fn new(output: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(output),
            header_written: false,
            rows: 0,
        }
    }

    /// Write one row and flush it
    pub fn write(&mut self, result: &ArbitrageResult) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(HEADER).map_err(sink_error)?;
            self.header_written = true;
        }

        self.writer
            .write_record([
                result.url.clone(),
                result.name.clone(),
                result.set.clone(),
                if result.is_foil { "X" } else { "" }.to_string(),
                format!("{:.2}", result.buylist_price),
                format!("{:.2}", result.market_price),
                format!("{:.2}", result.difference),
                format!("{:.2}%", result.spread_pct),
            ])
            .map_err(sink_error)?;
        self.writer.flush().map_err(|e| ArbError::Sink(e.to_string()))?;

        self.rows += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Recover the underlying output
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| ArbError::Sink(e.error().to_string()))
    }
}

fn sink_error(err: csv::Error) -> ArbError {
    ArbError::Sink(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, is_foil: bool) -> ArbitrageResult {
        ArbitrageResult {
            url: "http://www.cardshark.com/card".to_string(),
            name: name.to_string(),
            set: "Revised Edition".to_string(),
            is_foil,
            buylist_price: 10.0,
            market_price: 5.0,
            difference: 5.0,
            spread_pct: 100.0,
        }
    }

    fn output(sink: ResultSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn nothing_written_without_results() {
        let sink = ResultSink::new(Vec::new());
        assert_eq!(output(sink), "");
    }

    #[test]
    fn header_precedes_first_row_only() {
        let mut sink = ResultSink::new(Vec::new());
        sink.write(&result("Shivan Dragon", false)).unwrap();
        sink.write(&result("Serra Angel", true)).unwrap();
        assert_eq!(sink.rows(), 2);

        let text = output(sink);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "URL,Name,Set,Foil,Buylist Price,CS Price,Arb,Spread"
        );
        assert_eq!(
            lines[1],
            "http://www.cardshark.com/card,Shivan Dragon,Revised Edition,,10.00,5.00,5.00,100.00%"
        );
        assert!(lines[2].contains(",Serra Angel,Revised Edition,X,"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let mut sink = ResultSink::new(Vec::new());
        sink.write(&result("Sun Ce, Young Conquerer", false)).unwrap();

        assert!(output(sink).contains(",\"Sun Ce, Young Conquerer\","));
    }

    #[test]
    fn write_failure_is_sink_error() {
        let mut sink = ResultSink::new(FailingWriter);
        match sink.write(&result("Shivan Dragon", false)) {
            Err(ArbError::Sink(_)) => {}
            other => panic!("Expected ArbError::Sink, got: {other:?}"),
        }
    }
}
