//! Samples a Kronecker graph and optionally writes its edge list out to
//! sharded plain-text files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde_json::json;
use structopt::StructOpt;

use kronecker::{GeneratorConfig, Probabilities};

/// Generate a Kronecker (R-MAT) edge list.
#[derive(Debug, StructOpt)]
#[structopt(name = "generate", about = "Sample a Kronecker graph.")]
struct Opt {
    /// Recursion depth; the graph has 2^levels vertices.
    #[structopt(long)]
    levels: u32,

    /// Number of edges to sample (parallel edges and self-loops included).
    #[structopt(long)]
    edges: usize,

    /// Quadrant probabilities a,b,c,d for cells (1,2), (2,1), (2,2), (1,1).
    #[structopt(long, default_value = "0.57,0.19,0.19,0.05", parse(try_from_str = parse_probs))]
    probs: Probabilities,

    /// Random sampling seed
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// Number of logical workers; defaults to the thread pool size.
    #[structopt(long)]
    workers: Option<usize>,

    /// Output path prefix for `row col` lines, one file per worker share.
    #[structopt(long)]
    out: Option<PathBuf>,
}

fn parse_probs(s: &str) -> Result<Probabilities, String> {
    let ps = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    match ps.as_slice() {
        &[a, b, c, d] => Ok(Probabilities::new(a, b, c, d)),
        _ => Err(format!("expected 4 probabilities, got {}", ps.len())),
    }
}

fn main() {
    let opt = Opt::from_args();

    let mut config = GeneratorConfig::new(opt.levels, opt.edges)
        .probabilities(opt.probs)
        .seed(opt.seed);
    if let Some(workers) = opt.workers {
        config = config.workers(workers);
    }
    let generator = config.build().unwrap_or_else(|e| panic!("config: {}", e));

    let sample_start = Instant::now();
    let edges = generator.generate_par().expect("generate");
    println!(
        "{}",
        json!({
            "levels": generator.levels(),
            "nvertices": generator.side(),
            "nedges": edges.len(),
            "workers": generator.workers(),
            "sample_duration": format!("{:.0?}", Instant::now().duration_since(sample_start))
        })
    );

    let out = match opt.out {
        Some(out) => out,
        None => return,
    };

    let lines_per_file = 1 << 20;
    let nfiles = (edges.len() + lines_per_file - 1) / lines_per_file;
    let pairs = edges.pairs();

    let write_start = Instant::now();
    (0..nfiles).into_par_iter().for_each(|file_ix| {
        let lo = file_ix * pairs.len() / nfiles;
        let hi = (file_ix + 1) * pairs.len() / nfiles;

        let mut fname = out.file_name().expect("file name").to_owned();
        fname.push(format!(".{}", file_ix));
        let new_path = out.with_file_name(fname);
        let file = File::create(&new_path).expect("write file");
        let mut writer = BufWriter::new(file);

        for (row, col) in &pairs[lo..hi] {
            writeln!(writer, "{} {}", row, col).expect("write edge");
        }
        writer.flush().expect("flush");
    });

    println!(
        "{}",
        json!({
            "nfiles": nfiles,
            "write_duration": format!("{:.0?}", Instant::now().duration_since(write_start))
        })
    );
}
