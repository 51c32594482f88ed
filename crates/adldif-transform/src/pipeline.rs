//! Line-at-a-time streaming from a reader to a writer

use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::error::{TransformError, TransformResult};
use crate::transformer::{Emit, LineTransformer};

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub lines_read: u64,
    pub lines_written: u64,
    pub lines_dropped: u64,
}

/// Drives a transformer over an input stream.
///
/// Output is flushed after every line so the result can be piped into a
/// consumer that reads as records arrive.
pub struct Pipeline<T> {
    transformer: T,
    stats: PipelineStats,
}

impl<T: LineTransformer> Pipeline<T> {
    pub fn new(transformer: T) -> Self {
        Self {
            transformer,
            stats: PipelineStats::default(),
        }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Process `reader` until end of input.
    ///
    /// Stops at the first I/O error or undecodable value; the error carries
    /// the number of the offending line.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> TransformResult<PipelineStats> {
        debug!("Running {} transformer", self.transformer.name());

        if let Some(preamble) = self.transformer.preamble() {
            writeln!(writer, "{}", preamble)?;
            writer.flush()?;
            self.stats.lines_written += 1;
        }

        let mut buf = String::new();
        loop {
            buf.clear();
            let line_no = self.stats.lines_read + 1;
            let read = reader
                .read_line(&mut buf)
                .map_err(|e| TransformError::from(e).at_line(line_no))?;
            if read == 0 {
                break;
            }
            self.stats.lines_read = line_no;

            let emit = self
                .transformer
                .transform(&buf)
                .map_err(|e| e.at_line(line_no))?;

            match emit {
                Emit::Drop => {
                    trace!("Line {} dropped", line_no);
                    self.stats.lines_dropped += 1;
                    continue;
                }
                Emit::Verbatim(text) => writer.write_all(text.as_bytes())?,
                Emit::Line(text) => writeln!(writer, "{}", text)?,
            }
            writer.flush()?;
            self.stats.lines_written += 1;
        }

        debug!(
            "Processed {} lines ({} written, {} dropped)",
            self.stats.lines_read, self.stats.lines_written, self.stats.lines_dropped
        );
        Ok(self.stats)
    }
}
