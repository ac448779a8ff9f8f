// headgate/src/commands/plan.rs
//
// USE CASE: Preview what apply would do, without mutating anything.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::Table;

use headgate_core::application::{plan_setup, PlanAction};
use headgate_core::infrastructure::api::ControlPlaneClient;
use headgate_core::infrastructure::config::load_pipeline;

pub async fn execute(
    project_dir: PathBuf,
    api_url: String,
    api_token: String,
    workspace_id: String,
) -> anyhow::Result<()> {
    println!("⚙️  Loading pipeline configuration...");
    let pipeline = load_pipeline(&project_dir)
        .with_context(|| format!("Failed to load pipeline documents from {:?}", project_dir))?;

    let client = ControlPlaneClient::new(&api_url, &api_token, &workspace_id)
        .context("Failed to build the control-plane client")?;

    match plan_setup(&client, &pipeline).await {
        Ok(plan) => {
            let mut table = Table::new();
            table.set_header(vec!["Resource", "Name", "Action"]);
            table.add_row(vec![
                "source".to_string(),
                pipeline.source.name.clone(),
                describe(&plan.source),
            ]);
            table.add_row(vec![
                "destination".to_string(),
                pipeline.destination.name.clone(),
                describe(&plan.destination),
            ]);
            table.add_row(vec![
                "connection".to_string(),
                pipeline.connection.name.clone(),
                describe(&plan.connection),
            ]);
            println!("{table}");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Plan failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn describe(action: &PlanAction) -> String {
    match action {
        PlanAction::Create => "create".to_string(),
        PlanAction::Reuse { id } => format!("reuse ({id})"),
    }
}
