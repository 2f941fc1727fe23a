use animerec::{cli::Cli, run};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `init` must work before any config file exists.
    let config = if matches!(cli.command, Some(animerec::cli::Commands::Init)) {
        animerec::Config::default()
    } else {
        animerec::load_config(&cli)?
    };
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli, config))
}
