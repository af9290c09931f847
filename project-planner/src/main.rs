use clap::Parser;
use project_planner::planner::{cli::Args, run_workflow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run_workflow(args).await
}
