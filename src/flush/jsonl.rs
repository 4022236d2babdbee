use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Error;
use crate::sim::CycleReport;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Export one cycle's report to the given output directory.
///
/// Creates the output directory if it does not exist. Writes 5 files:
/// - `events.jsonl`: one WorldEvent per line, crisis events first
/// - `crises.jsonl`: one accepted Crisis per line
/// - `arcs.jsonl`: arcs spawned this cycle
/// - `hooks.jsonl`: story hooks in priority order
/// - `presence.json`: the domain presence map as a single object
pub fn flush_cycle_to_jsonl(report: &CycleReport, output_dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("events.jsonl"), report.events.iter())?;
    write_jsonl(&output_dir.join("crises.jsonl"), report.crises.iter())?;
    write_jsonl(&output_dir.join("arcs.jsonl"), report.spawned_arcs.iter())?;
    write_jsonl(&output_dir.join("hooks.jsonl"), report.hooks.iter())?;

    let mut writer = BufWriter::new(File::create(output_dir.join("presence.json"))?);
    serde_json::to_writer_pretty(&mut writer, &report.presence)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::debug!(cycle = report.cycle, dir = %output_dir.display(), "cycle exported");
    Ok(())
}

