use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use sampling_partition::generate::{random_agent_positions, uniform_cell_weights, variance_cell_weights};
use sampling_partition::imbalance::PartitionSummary;
use sampling_partition::io::{read_field_estimate, read_params, read_positions};
use sampling_partition::transport::{FileSink, PartitionService};
use sampling_partition::{Grid, HeterogeneityParams, Position};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of grid columns
    nx: usize,

    /// Number of grid rows
    ny: usize,

    /// Filename where the partition mapping can be stored
    partition_file: PathBuf,

    /// Distance between neighbouring cell centres
    #[arg(short, long, default_value_t = 1.0)]
    spacing: f64,

    /// X coordinate of the centre of cell 0
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    origin_x: f64,

    /// Y coordinate of the centre of cell 0
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    origin_y: f64,

    /// File with one `x,y` agent position per line
    #[arg(short, long, conflicts_with = "random_agents")]
    agents: Option<PathBuf>,

    /// Scatter this many agents over the domain instead of reading them
    #[arg(short, long)]
    random_agents: Option<usize>,

    /// Seed for random agent placement
    #[arg(long)]
    seed: Option<u64>,

    /// JSON cost model parameters (distance model if omitted)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// File with one `mean,variance` field estimate per cell
    #[arg(short, long)]
    field: Option<PathBuf>,

    /// Filename where the boundary edges can be stored
    #[arg(short, long)]
    boundary_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let grid = Grid::new(Position::new(args.origin_x, args.origin_y), args.spacing, args.nx, args.ny)?;
    let params = match &args.params {
        Some(path) => read_params(path)?,
        None => HeterogeneityParams::default(),
    };
    let agents = match (&args.agents, args.random_agents) {
        (Some(path), _) => read_positions(path)?,
        (None, Some(count)) => random_agent_positions(&grid.domain(), count, args.seed),
        (None, None) => return Err("either --agents or --random-agents is required".into()),
    };
    let field = args.field.as_deref().map(read_field_estimate).transpose()?;

    let sink = FileSink {
        partition_file: args.partition_file.clone(),
        boundary_file: args.boundary_file.clone(),
    };
    let mut service = PartitionService::new(grid, params, sink)?;
    let weights = match &field {
        Some(field) => variance_cell_weights(field),
        None => uniform_cell_weights(service.grid().len()),
    };
    if let Some(field) = field {
        service.update_field(field)?;
    }

    let start = Instant::now();
    let result = service.update_agents(&agents)?.clone();
    let elapsed_time = start.elapsed();

    let summary = PartitionSummary::from_result(&result, service.grid(), &weights);
    tracing::info!(
        agents = agents.len(),
        cells = result.cell_count(),
        clamped = result.clamped_agents().len(),
        "partition written to {}",
        args.partition_file.display()
    );
    println!("Boundary edges {:?}", result.boundary_edges().len());
    println!("Boundary length {:?}", summary.boundary_length);
    println!("Cells per agent {:?}", summary.cells_per_agent);
    println!("Imbalance {:?}", summary.imbalance);
    println!("Execution time {:?}", elapsed_time);
    Ok(())
}
