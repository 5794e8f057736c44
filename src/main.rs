use std::io;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use flowlets::cliopt::CliOpt;
use flowlets::runner::Runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(opt.log_level())),
        )
        .with_writer(io::stderr)
        .init();

    let runner = Runner::from_opt(&opt)?;
    runner.run(io::stdin(), io::stdout())?;

    Ok(())
}
