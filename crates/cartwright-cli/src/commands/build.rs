//! `cartwright build`: one build cycle, no runtime.

use cartwright_bundler::BuildOutcome;
use tracing::info;

use super::project::Project;
use crate::cli::BuildArgs;
use crate::config::CONFIG_FILE_NAME;
use crate::error::Result;
use crate::ui;

/// Build the game file once.
///
/// A project without `tic.ticExecutable` builds normally; the missing key is
/// only mentioned.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let project = Project::load(&args.project)?;
    let pipeline = project.pipeline();

    let spinner = ui::Spinner::new("Building game...");
    let report = match pipeline.run_cycle().await {
        Ok(report) => report,
        Err(err) => {
            spinner.fail("Build failed");
            return Err(err.into());
        }
    };

    spinner.finish(&format!(
        "Built {} in {}",
        report.artifact.path.display(),
        ui::format_duration(report.duration)
    ));
    ui::print_cycle_summary(&report);

    if report.artifact.is_suspiciously_small() {
        ui::warning("The game file contains almost no code");
    }
    if let BuildOutcome::BuildOnly { missing_key, .. } = &report.outcome {
        ui::info(&format!(
            "Set \"{missing_key}\" in {CONFIG_FILE_NAME} to launch the game with `cartwright run`"
        ));
    }

    info!(artifact = %report.outcome.artifact().display(), "build finished");
    Ok(())
}
