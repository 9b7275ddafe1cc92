use std::process::ExitCode;

use clap::Parser;
use envrepl::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // --help and --version also arrive here
            return if err.use_stderr() {
                ExitStatus::InvalidArguments.into()
            } else {
                ExitStatus::Success.into()
            };
        }
    };

    envrepl::cli::run_cli(args).into()
}
