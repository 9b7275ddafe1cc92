pub mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, ReplaceArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> ExitStatus {
    run::run(args)
}
