//! setup-jx binary entry point.

#![allow(clippy::print_stderr)]

use clap::Parser;
use setup_jx::cli::Cli;
use setup_jx::pipeline;
use setup_jx::run;
use setup_jx::tracing::init_tracing;

const EXIT_FAILURE: i32 = 1;

fn main() {
    // tracing may not be initialized (or may be mid-write) while panicking;
    // eprintln! is the reliable channel here.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("This is a bug, please report it with the log above.");
    }));

    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_format, cli.log_level) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Fatal error: failed to create async runtime: {e}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    if let Err(error) = runtime.block_on(run::run(&cli)) {
        // The message travels verbatim; the runner turns it into a step
        // failure annotation.
        pipeline::error(&error.to_string());
        std::process::exit(EXIT_FAILURE);
    }
}
