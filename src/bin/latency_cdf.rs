use clap::Parser;
use latency_tools::cli::{self, CdfCli};

fn main() {
    cli::init_logging();

    let args = match CdfCli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(cli::usage_exit_code(&e));
        }
    };

    if let Err(e) = cli::run_cdf(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
