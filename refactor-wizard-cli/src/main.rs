use clap::Parser;
use refactor_wizard_core::{execute_refactor_wizard_flow, style, CoreCliArgs, FlowOutcome};

#[tokio::main]
async fn main() {
    let cli_args = CoreCliArgs::parse();
    match execute_refactor_wizard_flow(cli_args.clone()).await {
        Ok(FlowOutcome::Directory(Some(summary))) => {
            if !cli_args.json {
                println!(
                    "{}",
                    style(format!(
                        "✨ refactor complete: {} file{} written ✨",
                        summary.files_written,
                        if summary.files_written == 1 { "" } else { "s" }
                    ))
                    .green()
                    .bold()
                );
            }
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!(
                "{} {} {}",
                style("❌"),
                style("refactor-wizard failed:").red().bold(),
                style(&e).red()
            );
            std::process::exit(1);
        }
    }
}
