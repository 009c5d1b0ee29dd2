mod transfer;

use anyhow::Result;

use crate::cli::Cli;
use crate::display::Context;

pub fn run(cli: Cli, ctx: Context) -> Result<()> {
    transfer::run_transfer(cli, ctx)
}
