use clap::Parser;
use latency_tools::cli::{self, PlotCli};

fn main() {
    cli::init_logging();

    let args = match PlotCli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(cli::usage_exit_code(&e));
        }
    };

    if let Err(e) = cli::run_plot(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
