//! CLI entrypoint for the cmdset demo.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    cmdset_demo::run(std::env::args_os(), &mut stdout, &mut stderr)
}
