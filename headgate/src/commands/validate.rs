// headgate/src/commands/validate.rs
//
// USE CASE: Offline check of the three documents (load + env + validation).

use std::path::PathBuf;

use headgate_core::infrastructure::config::load_pipeline;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    println!("⚙️  Validating pipeline documents in {:?}...", project_dir);

    match load_pipeline(&project_dir) {
        Ok(pipeline) => {
            println!("   ✅ source      '{}'", pipeline.source.name);
            println!("   ✅ destination '{}'", pipeline.destination.name);
            println!(
                "   ✅ connection  '{}' ({} streams, every {} {})",
                pipeline.connection.name,
                pipeline.connection.streams.len(),
                pipeline.connection.schedule.every,
                pipeline.connection.schedule.unit.as_str()
            );
            println!("✨ Configuration is valid.");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Validation failed: {}", e);
            std::process::exit(1);
        }
    }
}
