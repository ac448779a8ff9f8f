// headgate/src/commands/apply.rs
//
// USE CASE: Provision the pipeline on the control plane.

use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use headgate_core::application::{run_setup, SetupOptions, SetupReport};
use headgate_core::infrastructure::api::ControlPlaneClient;
use headgate_core::infrastructure::config::load_pipeline;

pub async fn execute(
    project_dir: PathBuf,
    api_url: String,
    api_token: String,
    workspace_id: String,
    skip_checks: bool,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the documents (Infra)
    println!("⚙️  Loading pipeline configuration...");
    let pipeline = load_pipeline(&project_dir)
        .with_context(|| format!("Failed to load pipeline documents from {:?}", project_dir))?;
    println!(
        "   Pipeline: {} ({} streams)",
        pipeline.connection.name,
        pipeline.connection.streams.len()
    );

    // B. Instantiate the control-plane adapter
    debug!(api_url = %api_url, workspace_id = %workspace_id, "Building control-plane client");
    let client = ControlPlaneClient::new(&api_url, &api_token, &workspace_id)
        .context("Failed to build the control-plane client")?;

    // C. Run the setup (Application Layer)
    let options = SetupOptions { skip_checks };
    match run_setup(&client, &pipeline, &options).await {
        Ok(report) => {
            save_report(&project_dir, &report)?;
            println!("\n✨ SUCCESS! Pipeline configured in {:.2?}", start.elapsed());
            println!("   • Source ID:       {}", report.source.id);
            println!("   • Destination ID:  {}", report.destination.id);
            println!("   • Connection ID:   {}", report.connection.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n💥 SETUP FAILED: {}", e);
            std::process::exit(1);
        }
    }
}

fn save_report(project_dir: &PathBuf, report: &SetupReport) -> anyhow::Result<()> {
    let target_dir = project_dir.join("target");
    std::fs::create_dir_all(&target_dir)?;
    let report_path = target_dir.join("setup_report.json");
    report
        .save(&report_path)
        .with_context(|| format!("Failed to write setup report at {:?}", report_path))?;
    println!("   📄 Report saved to {}", report_path.display());
    Ok(())
}
