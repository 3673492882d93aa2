use clap::Parser;

pub mod logging;
pub mod sync;

/// Parses the command line, sets up logging and runs the sync to completion.
pub fn run() -> eyre::Result<()> {
    let command = sync::Command::parse();
    logging::init_tracing(command.verbose);

    // one request at a time, no need for worker threads
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(command.execute())
}
