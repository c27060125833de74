use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use bzpath_core::{
    coords::{normalize_full_range, normalize_irreducible},
    export::split_for_export,
    grid::Sample,
    io::{ExportJobConfig, JobFile, PathJobConfig},
    lattice::LatticeKind,
    output::{
        CsvLayout, chunk_file_name, path_file_name, segment_file_name, write_chunk_csv,
        write_path_csv, write_segment_csv,
    },
    path::assemble_from_provider,
    provider::{InMemoryProvider, MemoizedProvider, SampleProvider, SweepAxis},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_complex::Complex64;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "bzpath",
    about = "Assemble Brillouin-zone dispersion paths from dual phase-sweep eigenmode data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Suppress progress logs (stderr)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble the ordered zone-boundary path
    Path(PathArgs),
    /// Split a field sweep into width-bounded tables
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct PathArgs {
    /// Path to a TOML job file with a [path] table (defaults apply if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON sample dump exported from the solver
    #[arg(short, long)]
    samples: PathBuf,
    /// Override the lattice from the job file
    #[arg(long, value_enum)]
    lattice: Option<LatticeArg>,
    /// Override the number of modes to carry
    #[arg(long)]
    modes: Option<usize>,
    /// Directory for the CSV outputs
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// Also write one table per boundary edge
    #[arg(long)]
    segments: bool,
    /// Values only: no header, no label column
    #[arg(long)]
    bare: bool,
    /// Add a cumulative path-distance column
    #[arg(long)]
    distance: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Path to a TOML job file with an [export] table (defaults apply if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON field dump exported from the solver
    #[arg(short, long)]
    samples: PathBuf,
    /// Override the number of ky values per output table
    #[arg(long)]
    max_chunk_width: Option<i64>,
    /// Directory for the CSV outputs
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Clone, Debug, ValueEnum)]
enum LatticeArg {
    Square,
    Triangular,
}

impl From<LatticeArg> for LatticeKind {
    fn from(value: LatticeArg) -> Self {
        match value {
            LatticeArg::Square => LatticeKind::Square,
            LatticeArg::Triangular => LatticeKind::Triangular,
        }
    }
}

/// Solver dump: coordinates in radians, one record per solved variation.
#[derive(Debug, Deserialize)]
struct SampleDump {
    mode_count: usize,
    samples: Vec<DumpRecord>,
}

#[derive(Debug, Deserialize)]
struct DumpRecord {
    kx: f64,
    ky: f64,
    #[serde(default)]
    values: Vec<f64>,
    /// Complex field components as `[re, im]` pairs; takes precedence over
    /// `values` and is flattened to interleaved channels.
    #[serde(default)]
    field: Vec<Complex64>,
}

impl DumpRecord {
    fn into_record(self) -> (f64, f64, Vec<f64>) {
        if self.field.is_empty() {
            return (self.kx, self.ky, self.values);
        }
        let sample = Sample::from_field(self.kx, self.ky, &self.field);
        (sample.kx, sample.ky, sample.values)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Path(args) => run_path(args, cli.quiet),
        Command::Export(args) => run_export(args, cli.quiet),
    }
}

fn run_path(args: PathArgs, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            progress(quiet, format!("loading config {}", path.display()));
            JobFile::from_file(path)?
                .path
                .ok_or("job file has no [path] table")?
        }
        None => PathJobConfig::default(),
    };
    if let Some(lattice) = args.lattice.clone() {
        config.lattice = lattice.into();
    }
    if let Some(modes) = args.modes {
        config.mode_count = modes;
    }
    config.validate()?;

    let dump = load_dump(&args.samples, quiet)?;
    let mode_count = config.mode_count;
    if dump.mode_count < mode_count {
        return Err(format!(
            "dump carries {} mode(s), {} requested",
            dump.mode_count, mode_count
        )
        .into());
    }
    let records = dump.samples.into_iter().map(|r| {
        let values: Vec<f64> = r.values.into_iter().take(mode_count).collect();
        (r.kx, r.ky, values)
    });
    let provider = InMemoryProvider::from_radians(mode_count, records)?
        .with_tolerance(config.normalize.dedup_tolerance);
    let mut provider = MemoizedProvider::new(provider);

    let kx = normalize_irreducible(&provider.available(SweepAxis::X), &config.normalize)?;
    let ky = normalize_irreducible(&provider.available(SweepAxis::Y), &config.normalize)?;
    progress(
        quiet,
        format!(
            "setup {}: {} {} value(s), {} {} value(s) in the irreducible zone",
            config.setup_index + 1,
            kx.len(),
            config.x_variable,
            ky.len(),
            config.y_variable
        ),
    );
    progress(quiet, format!("generating {} lattice path", config.lattice));

    let path = assemble_from_provider(&mut provider, mode_count, &kx, &ky, config.lattice)?;

    let layout = if args.bare {
        CsvLayout::bare()
    } else {
        CsvLayout {
            distance: args.distance,
            ..CsvLayout::labelled(&config.x_variable, &config.y_variable)
        }
    };

    fs::create_dir_all(&args.output_dir)?;
    if args.segments {
        for (index, segment) in path.segments().iter().enumerate() {
            let dest = args
                .output_dir
                .join(segment_file_name(&config.output_name_base, index));
            let mut writer = create(&dest)?;
            write_segment_csv(&mut writer, segment, mode_count, &layout)?;
            progress(
                quiet,
                format!("wrote {} ({} rows) to {}", segment.label(), segment.len(), dest.display()),
            );
        }
    }

    let dest = args
        .output_dir
        .join(path_file_name(&config.output_name_base));
    let mut writer = create(&dest)?;
    write_path_csv(&mut writer, &path, &layout)?;
    progress(
        quiet,
        format!(
            "wrote {} rows to {} ({} cached lookup(s))",
            path.len(),
            dest.display(),
            provider.hits()
        ),
    );
    Ok(())
}

fn run_export(args: ExportArgs, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            progress(quiet, format!("loading config {}", path.display()));
            JobFile::from_file(path)?
                .export
                .ok_or("job file has no [export] table")?
        }
        None => ExportJobConfig::default(),
    };
    if let Some(width) = args.max_chunk_width {
        config.max_chunk_width = width;
    }
    config.validate()?;

    let dump = load_dump(&args.samples, quiet)?;
    let records = dump.samples.into_iter().map(DumpRecord::into_record);
    let provider = InMemoryProvider::from_radians(dump.mode_count, records)?
        .with_tolerance(config.normalize.dedup_tolerance);

    let kx = normalize_full_range(&provider.available(SweepAxis::X), &config.normalize)?;
    let ky = normalize_full_range(&provider.available(SweepAxis::Y), &config.normalize)?;
    progress(
        quiet,
        format!(
            "exporting {} over {} for {} x {} variation(s) from {}",
            config.field_component,
            config.points_file_name(),
            kx.len(),
            ky.len(),
            config.setup_label
        ),
    );

    let chunks = split_for_export(provider.grid(), &kx, &ky, config.max_chunk_width)?;

    fs::create_dir_all(&args.output_dir)?;
    for chunk in &chunks {
        let dest = args
            .output_dir
            .join(chunk_file_name(&config.output_name_base, chunk.index()));
        let mut writer = create(&dest)?;
        write_chunk_csv(&mut writer, chunk)?;
        progress(
            quiet,
            format!("wrote chunk {} ({} ky column(s)) to {}", chunk.index(), chunk.width(), dest.display()),
        );
    }
    progress(quiet, format!("finished {} chunk(s)", chunks.len()));
    Ok(())
}

fn load_dump(path: &Path, quiet: bool) -> Result<SampleDump, Box<dyn std::error::Error>> {
    progress(quiet, format!("reading samples {}", path.display()));
    let reader = BufReader::new(File::open(path)?);
    let dump: SampleDump = serde_json::from_reader(reader)?;
    Ok(dump)
}

fn create(path: &Path) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

fn progress(quiet: bool, message: String) {
    if !quiet {
        eprintln!("[cli] {message}");
    }
}
