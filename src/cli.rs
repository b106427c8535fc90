use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use feimeta::{
    config,
    logging,
    read_emi_metadata,
    read_image_metadata,
    run_batch,
    BatchRequest,
    FileKind,
    MatchedPair,
    MetadataRecord,
    SerLoader,
};

/// Top-level CLI for the FEI metadata extractor.
#[derive(Debug, Parser)]
#[command(name = "feimeta")]
#[command(about = "Extract metadata from FEI EMI/SER file pairs", long_about = None)]
pub struct Cli {
    /// Config file to use instead of $XDG_CONFIG_HOME/feimeta/config.toml.
    #[arg(long, global = true)]
    pub config : Option<PathBuf>,

    #[command(subcommand)]
    pub command : CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Match EMI and SER files and write one `<stem>_metadata.txt` per pair.
    Extract {
        /// EMI files.
        #[arg(long = "emi", num_args = 1..)]
        emi : Vec<PathBuf>,

        /// SER files.
        #[arg(long = "ser", num_args = 1..)]
        ser : Vec<PathBuf>,

        /// EMI or SER files, sorted by extension.
        files : Vec<PathBuf>,

        /// Directory the reports are written to.
        #[arg(short, long)]
        output : Option<PathBuf>,

        /// Don't echo the records to stdout.
        #[arg(short, long)]
        quiet : bool,
    },

    /// Print the metadata of a single EMI or SER file.
    Inspect {
        /// Path to an `.emi` or `.ser` file.
        path : PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let cfg = config::load(cli.config.as_deref())?;
        logging::init_logging(&cfg.log_filter);
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Extract { emi, ser, files, output, quiet } => {
                let mut request = BatchRequest {
                    metadata_files : emi,
                    image_files : ser,
                    output_dir : output.or(cfg.output_dir),
                };
                for path in files {
                    match FileKind::from_path(&path) {
                        Some(FileKind::Metadata) => request.metadata_files.push(path),
                        Some(FileKind::Image) => request.image_files.push(path),
                        None => tracing::warn!("ignoring {}: not an EMI or SER file", path.display()),
                    }
                }

                let echo = cfg.print_records && !quiet;
                let mut view = |pair : &MatchedPair, record : &MetadataRecord| {
                    if echo {
                        show_record(pair, record);
                    }
                };
                let report = run_batch(&request, &SerLoader, &mut view)?;

                for skipped in &report.skipped {
                    tracing::warn!(
                        "no metadata written for {}: {}",
                        skipped.pair.metadata.path().display(),
                        skipped.reason
                    );
                }
                eprintln!(
                    "Metadata extraction completed: {} report(s) written to {}",
                    report.written.len(),
                    request.output_dir.as_deref().map(|dir| dir.display().to_string()).unwrap_or_default(),
                );
            },
            CliCommand::Inspect { path } => {
                let record = match FileKind::from_path(&path) {
                    Some(FileKind::Metadata) => read_emi_metadata(&path),
                    Some(FileKind::Image) => read_image_metadata(&SerLoader, &path),
                    None => bail!("{} is neither an EMI nor a SER file", path.display()),
                }.with_context(|| format!("extracting metadata from {}", path.display()))?;
                print!("{}", record);
            },
        }

        Ok(())
    }
}

fn show_record(pair : &MatchedPair, record : &MetadataRecord) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(
        stdout,
        "== {} + {}",
        pair.metadata.path().display(),
        pair.image.path().display()
    ).and_then(|_| write!(stdout, "{}", record));
}
