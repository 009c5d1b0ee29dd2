use anyhow::{Context as _, Result, bail};

use snap_transfer::{ParticleConfig, TransferConfig, plan_jobs, read_manifest, run_job};

use crate::cli::Cli;
use crate::display::{Context, Progress};

pub fn run_transfer(cli: Cli, ctx: Context) -> Result<()> {
    let config = build_config(&cli);
    if config.kinds.is_empty() {
        bail!("No data types selected; pass at least one via -d/--data-type.");
    }

    let bases = read_manifest(&cli.path_list).with_context(|| {
        format!(
            "Failed to read snapshot path list '{}'",
            cli.path_list.display()
        )
    })?;

    let mut progress = Progress::new(&ctx, bases.len());
    for base in &bases {
        progress.begin_path(base);
        for job in plan_jobs(base, &config) {
            run_job(&job, &config).with_context(|| {
                format!(
                    "Failed to convert '{}' ({} -> {})",
                    job.load_path.display(),
                    config.snapshot_format,
                    config.output_format
                )
            })?;
        }
    }
    progress.finish();

    Ok(())
}

fn build_config(cli: &Cli) -> TransferConfig {
    TransferConfig {
        particle: ParticleConfig {
            interrupt_mode: cli.interrupt_mode,
            external_mode: cli.external_mode,
            full_binary: cli.full_binary,
        },
        snapshot_format: cli.snapshot_format.into(),
        output_format: cli.output_format.into(),
        kinds: cli.data_type.iter().map(|&kind| kind.into()).collect(),
        replace: cli.replace,
    }
}
