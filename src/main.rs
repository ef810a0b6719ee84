use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seqevolve::evolve::{self, EvolveOpt, KimuraParams};
use seqevolve::io::fasta::{self, FastaWriter};
use seqevolve::io::snapshot::{self, Snapshot, SnapshotMeta};
use seqevolve::SeqMap;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "seqevolve", author, version, about = "Evolve nucleotide sequences under the Kimura two-parameter model", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve every sequence of a FASTA file or snapshot
    Evolve {
        /// Input FASTA or .sqd snapshot
        input: PathBuf,
        /// Output path (FASTA, or snapshot if it ends in .sqd); stdout if omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Elapsed evolutionary time
        #[arg(short = 'T', long, default_value_t = 0.1)]
        time: f64,
        /// Transition rate
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,
        /// Transversion rate
        #[arg(long, default_value_t = 1.0)]
        beta: f64,
        /// RNG seed (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Worker threads, 0 for one per core
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        /// FASTA line width, 0 for unwrapped
        #[arg(short, long, default_value_t = fasta::DEFAULT_WIDTH)]
        width: usize,
    },
    /// Print a summary of a FASTA file or snapshot
    Info {
        /// Input FASTA or .sqd snapshot
        input: PathBuf,
    },
    /// Convert a FASTA file into a .sqd snapshot
    Pack {
        /// Input FASTA file
        fasta: PathBuf,
        /// Output prefix for the snapshot file
        #[arg(short, long, default_value = "seqs")]
        output: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Evolve { input, out, time, alpha, beta, seed, threads, width } => {
            let params = KimuraParams::new(time, alpha, beta)?;
            let seed = seed.unwrap_or_else(|| {
                let s = rand::random();
                eprintln!("seed: {}", s);
                s
            });
            let opt = EvolveOpt { params, seed };
            run_evolve(&input, out.as_deref(), opt, threads, width)
        }
        Commands::Info { input } => run_info(&input),
        Commands::Pack { fasta, output } => run_pack(&fasta, &output),
    }
}

fn load_input(path: &Path) -> Result<SeqMap> {
    if snapshot::is_snapshot_path(path) {
        Ok(Snapshot::load_from_file(path)?.seqs)
    } else {
        fasta::read_seq_map_from_path(path)
    }
}

fn run_evolve(input: &Path, out: Option<&Path>, opt: EvolveOpt, threads: usize, width: usize) -> Result<()> {
    // 0 keeps rayon's default pool (one thread per core)
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow::anyhow!("cannot start {} worker threads: {}", threads, e))?;
    }

    let seqs = load_input(input)?;
    if seqs.is_empty() {
        anyhow::bail!("'{}' contains no sequences", input.display());
    }
    tracing::info!(seed = opt.seed, seqs = seqs.len(), "evolve");
    let evolved = evolve::evolve_map(&seqs, &opt)?;

    match out {
        Some(p) if snapshot::is_snapshot_path(p) => {
            let mut meta = SnapshotMeta::now(Some(input.display().to_string()));
            meta.params = Some(opt.params);
            meta.seed = Some(opt.seed);
            Snapshot::new(evolved, meta).save_to_file(p)?;
        }
        Some(p) => {
            let fh = std::fs::File::create(p)
                .map_err(|e| anyhow::anyhow!("cannot create '{}': {}", p.display(), e))?;
            let mut w = FastaWriter::with_width(std::io::BufWriter::new(fh), width);
            w.write_map(&evolved)?;
            w.flush()?;
        }
        None => {
            let mut w = FastaWriter::with_width(std::io::BufWriter::new(std::io::stdout()), width);
            w.write_map(&evolved)?;
            w.flush()?;
        }
    }
    Ok(())
}

fn run_info(input: &Path) -> Result<()> {
    let seqs = load_input(input)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "input: {}", input.display())?;
    writeln!(out, "sequences: {}", seqs.len())?;
    writeln!(out, "total_len: {}", seqs.total_len())?;
    if !seqs.is_empty() && seqs.is_aligned() {
        writeln!(out, "alignment_len: {}", seqs.alignment_len()?)?;
    }
    for (name, seq) in &seqs {
        writeln!(out, "{}\t{}", name, seq.len())?;
    }
    Ok(())
}

fn run_pack(fasta_path: &Path, output: &str) -> Result<()> {
    let seqs = fasta::read_seq_map_from_path(fasta_path)?;
    if seqs.is_empty() {
        anyhow::bail!("FASTA file '{}' contains no sequences", fasta_path.display());
    }
    let n = seqs.len();
    let meta = SnapshotMeta::now(Some(fasta_path.display().to_string()));
    let out_path = format!("{}.{}", output, snapshot::EXTENSION);
    Snapshot::new(seqs, meta).save_to_file(&out_path)?;
    println!("sequences: {}", n);
    println!("snapshot saved: {}", out_path);
    Ok(())
}
