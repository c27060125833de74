//! CSV emission for assembled paths and export chunks.

use std::io::{self, Write};

use crate::{
    export::ExportChunk,
    grid::Sample,
    path::{AssembledPath, PathSegment, cumulative_distances},
};

/// Column layout for path tables.
#[derive(Debug, Clone)]
pub struct CsvLayout {
    /// Write a header row.
    pub header: bool,
    /// Sweep variable names for the label column; `None` drops the column.
    pub label: Option<(String, String)>,
    /// Append the cumulative path distance after the label.
    pub distance: bool,
}

impl CsvLayout {
    /// Values only, no header: the legacy dispersion table.
    pub fn bare() -> Self {
        Self {
            header: false,
            label: None,
            distance: false,
        }
    }

    pub fn labelled(x_variable: &str, y_variable: &str) -> Self {
        Self {
            header: true,
            label: Some((x_variable.to_string(), y_variable.to_string())),
            distance: false,
        }
    }
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self::labelled("px", "py")
    }
}

/// `"{base}dispersionData.csv"`
pub fn path_file_name(base: &str) -> String {
    format!("{base}dispersionData.csv")
}

/// `"{base}path{n}.csv"` with `n` counted from 1.
pub fn segment_file_name(base: &str, index: usize) -> String {
    format!("{base}path{}.csv", index + 1)
}

/// `"{base}{index}.csv"`
pub fn chunk_file_name(base: &str, index: usize) -> String {
    format!("{base}{index}.csv")
}

/// Label for one sample, e.g. `px=180deg py=60deg`.
pub fn sample_label(x_variable: &str, y_variable: &str, sample: &Sample) -> String {
    format!(
        "{x_variable}={}deg {y_variable}={}deg",
        sample.kx, sample.ky
    )
}

/// Write the assembled path, one row per sample in path order.
pub fn write_path_csv<W: Write>(
    writer: &mut W,
    path: &AssembledPath,
    layout: &CsvLayout,
) -> io::Result<()> {
    let distances = path.distances();
    write_rows(writer, path.samples(), &distances, path.mode_count(), layout)
}

/// Write one boundary edge as it was resolved, shared corner included.
pub fn write_segment_csv<W: Write>(
    writer: &mut W,
    segment: &PathSegment,
    mode_count: usize,
    layout: &CsvLayout,
) -> io::Result<()> {
    let distances = cumulative_distances(&segment.samples);
    write_rows(writer, &segment.samples, &distances, mode_count, layout)
}

fn write_rows<W: Write>(
    writer: &mut W,
    samples: &[Sample],
    distances: &[f64],
    mode_count: usize,
    layout: &CsvLayout,
) -> io::Result<()> {
    if layout.header {
        let mut columns: Vec<String> = Vec::new();
        if layout.label.is_some() {
            columns.push("label".to_string());
        }
        if layout.distance {
            columns.push("distance".to_string());
        }
        columns.extend((1..=mode_count).map(|mode| format!("mode{mode}")));
        writeln!(writer, "{}", columns.join(","))?;
    }

    for (idx, sample) in samples.iter().enumerate() {
        let mut cells: Vec<String> = Vec::with_capacity(mode_count + 2);
        if let Some((x, y)) = &layout.label {
            cells.push(sample_label(x, y, sample));
        }
        if layout.distance {
            let distance = distances.get(idx).copied().unwrap_or_default();
            cells.push(distance.to_string());
        }
        cells.extend(sample.values.iter().map(f64::to_string));
        writeln!(writer, "{}", cells.join(","))?;
    }
    writer.flush()
}

/// Write one export chunk: header, then one row per primary coordinate.
///
/// The header names each payload component as `ky<deg>_c<k>`.
pub fn write_chunk_csv<W: Write>(writer: &mut W, chunk: &ExportChunk) -> io::Result<()> {
    let components = chunk
        .samples()
        .first()
        .map(|s| s.values.len())
        .unwrap_or(0);
    let mut header = vec!["kx".to_string()];
    for ky in chunk.secondary().iter() {
        header.extend((0..components).map(|c| format!("ky{ky}_c{c}")));
    }
    writeln!(writer, "{}", header.join(","))?;

    for (kx, row) in chunk.primary().iter().zip(chunk.rows()) {
        write!(writer, "{kx}")?;
        for value in row {
            write!(writer, ",{value}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}
