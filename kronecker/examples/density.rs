//! Samples a Kronecker graph and reports its degree distribution along
//! with a coarsened density grid of the adjacency matrix.

use std::time::Instant;

use serde_json::json;
use structopt::StructOpt;

use kronecker::GeneratorConfig;

/// Summarizes the sparsity pattern of a Graph500-style Kronecker graph.
#[derive(Debug, StructOpt)]
#[structopt(name = "density", about = "Inspect a Kronecker graph's density.")]
struct Opt {
    /// Recursion depth; the graph has 2^levels vertices.
    #[structopt(long)]
    levels: u32,

    /// Number of edges to sample.
    #[structopt(long)]
    edges: usize,

    /// Side of the coarsened density grid.
    #[structopt(long, default_value = "8")]
    grid: u64,

    /// Random sampling seed
    #[structopt(long, default_value = "0")]
    seed: u64,
}

fn main() {
    let opt = Opt::from_args();
    let generator = GeneratorConfig::new(opt.levels, opt.edges)
        .seed(opt.seed)
        .build()
        .unwrap_or_else(|e| panic!("config: {}", e));

    let sample_start = Instant::now();
    let edges = generator.generate_par().expect("generate");
    let sample_duration = Instant::now().duration_since(sample_start);

    let view_start = Instant::now();
    let view = edges.into_sparse_view();
    let view_duration = Instant::now().duration_since(view_start);

    println!(
        "{}",
        json!({
            "nvertices": view.side(),
            "nedges": view.total(),
            "distinct_edges": view.nnz(),
            "nonempty_rows": view.nrows(),
            "sample_duration": format!("{:.0?}", sample_duration),
            "view_duration": format!("{:.0?}", view_duration),
        })
    );

    if let Some(stats) = view.out_degree_stats() {
        println!("{}", json!({ "out_degree": stats.to_map() }));
    }

    let grid = opt.grid.min(view.side());
    let density = view
        .coarsen(grid)
        .unwrap_or_else(|e| panic!("coarsen: {}", e));
    let rows: Vec<&[u64]> = density.chunks(grid as usize).collect();
    println!("{}", json!({ "grid": grid, "density": rows }));
}
