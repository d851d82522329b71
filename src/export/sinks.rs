use std::io::{BufWriter, Write};

use crate::errors::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub trait RowSink {
    fn write_row(&mut self, row: &[String]) -> Result<()>;
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Delimited text with standard quoting and CRLF line ends.
pub struct CsvSink<W: Write> {
    w: csv::Writer<BufWriter<W>>,
}
impl<W: Write> CsvSink<W> {
    /// # Errors
    /// Returns an error if the byte order mark cannot be written.
    pub fn new(inner: W, delimiter: u8, bom: bool) -> Result<Self> {
        let mut out = BufWriter::new(inner);
        if bom {
            out.write_all(UTF8_BOM)?;
        }
        let w = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(csv::Terminator::CRLF)
            .from_writer(out);
        Ok(Self { w })
    }
}
impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.w.write_record(row)?;
        Ok(())
    }
    fn finish(mut self: Box<Self>) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }
}
