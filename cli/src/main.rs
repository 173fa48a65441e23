mod commands;
mod terminal;

use std::process::ExitCode;

use clap::Parser;
use commands::{CommandLine, Context};
use pcislot_core::runner::SystemRunner;
use pcislot_core::sysfs::LinkTable;
use pcislot_core::system::ensure_privileged;
use terminal::{logging, print};
use tracing::error;

fn main() -> ExitCode {
    let commands = match CommandLine::try_parse() {
        Ok(commands) => commands,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("[-] {io}");
            }
            return ExitCode::from(parse_failure_status(&e));
        }
    };

    if let Err(e) = logging::init_logging(commands.output.as_deref()) {
        eprintln!("[-] {e:#}");
        return ExitCode::FAILURE;
    }

    print::banner();

    if let Err(e) = ensure_privileged() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let cfg = commands.config();
    let runner = SystemRunner;
    let links = LinkTable::from_host();
    let ctx = Context {
        cfg: &cfg,
        runner: &runner,
        links: &links,
    };

    let result = ctx.dispatch(commands.mode());
    if let Err(e) = &result {
        error!("{e:#}");
    } else {
        print::end_of_program();
    }
    ExitCode::from(run_status(&result))
}

/// Help and version requests are not failures; usage errors are.
fn parse_failure_status(e: &clap::Error) -> u8 {
    if e.use_stderr() { 1 } else { 0 }
}

fn run_status(result: &anyhow::Result<()>) -> u8 {
    if result.is_ok() { 0 } else { 1 }
}
