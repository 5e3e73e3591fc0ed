#![allow(clippy::print_stderr)]

use std::io::IsTerminal;

use clap::Parser;

use gentype::cli::args::CliArgs;
use gentype::cli::{driver, reporter::Reporter};

/// The relation holds.
const EXIT_HOLDS: i32 = 0;
/// The relation does not hold.
const EXIT_DOES_NOT_HOLD: i32 = 1;
/// Parse failure, bad class declaration, or relation error.
const EXIT_ERROR: i32 = 2;

fn main() {
    // Initialize tracing if GENTYPE_LOG or RUST_LOG is set (zero cost otherwise).
    gentype::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match driver::run(&args) {
        Ok(outcome) => {
            let reporter = Reporter::new(args.format, std::io::stdout().is_terminal());
            print!("{}", reporter.render(&outcome));
            std::process::exit(if outcome.holds {
                EXIT_HOLDS
            } else {
                EXIT_DOES_NOT_HOLD
            });
        }
        Err(err) => {
            let reporter = Reporter::new(args.format, std::io::stderr().is_terminal());
            eprint!("{}", reporter.render_error(&err));
            std::process::exit(EXIT_ERROR);
        }
    }
}
