use clap::Parser;
use postman::{solve, SolverConfig};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{error, info};

mod input;
mod logging;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// A path to a JSON edge list, else reads from stdin
    file: Option<PathBuf>,

    /// Vertex the tour starts and ends at. Defaults to V1 if the graph has it, else the first vertex listed.
    #[arg(long)]
    start: Option<String>,

    /// Refuse graphs with more odd-degree vertices than this, as matching them takes 2^n time and space
    #[arg(long, default_value_t = SolverConfig::default().max_odd_vertices)]
    max_odd_vertices: usize,

    /// Run the shortest path searches on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Output file path (overwrites old files), else writes to stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    logging::init();
    let opt = Opt::parse();

    match run(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let edges = match &opt.file {
        Some(path) => input::read_edges(BufReader::new(File::open(path)?))?,
        None => {
            info!("Reading from stdin");
            input::read_edges(io::stdin().lock())?
        }
    };

    let config = SolverConfig::default()
        .with_max_odd_vertices(opt.max_odd_vertices)
        .with_parallel(!opt.sequential);
    let start = input::resolve_start(&edges, opt.start);
    let solution = solve(&edges, start.as_ref(), &config)?;

    let mut out: Box<dyn Write> = match &opt.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    if opt.pretty {
        serde_json::to_writer_pretty(&mut out, &solution)?;
    } else {
        serde_json::to_writer(&mut out, &solution)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
