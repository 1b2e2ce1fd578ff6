//! Batch Import
//!
//! Chunk a document and stream it to a sink, stopping at the first failure.
//!
//! ```bash
//! cargo run --example batch_import
//! ```

use cleave::{chunk, ingest, BatchPlan, Chunk, IngestionSink, SinkError};

/// A sink that prints chunks and refuses anything over a size budget.
struct PrintSink {
    max_chars: usize,
}

impl IngestionSink for PrintSink {
    fn submit(&mut self, chunk: &Chunk, sequence: usize) -> Result<(), SinkError> {
        if chunk.char_count() > self.max_chars {
            return Err(format!("{} chars exceeds {}", chunk.char_count(), self.max_chars).into());
        }
        println!("✓ chunk {sequence}: {}", chunk.text);
        Ok(())
    }
}

fn main() {
    let long = "很长".repeat(40);
    let document = format!("第1章 开始。一切都很平静。第2章 {long}。第3章 结束。");

    let plan = BatchPlan::default();
    let report = ingest(chunk(&document, 10), PrintSink { max_chars: 50 }, &plan);

    match report.failed_at() {
        Some(sequence) => println!(
            "✗ stopped at chunk {sequence} after {} stored; rerun with start_from = {sequence}",
            report.succeeded
        ),
        None => println!("all {} chunks stored", report.succeeded),
    }
}
