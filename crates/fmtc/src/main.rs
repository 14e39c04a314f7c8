use std::io;
use std::process::ExitCode;

use fmtc::app::{run, AppIo};
use fmtc_input::env::{RealEnv, RealStdin};

/// Entry point.
///
/// Execution is single-threaded from start to finish. No async runtime or
/// worker pool is started, so the bytes reach each stream in the exact order
/// they are written.
fn main() -> ExitCode {
    fmtc::logging::init(&RealEnv);

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let mut app_io = AppIo::new(&RealStdin, &RealEnv, &mut out, &mut err);

    ExitCode::from(run(std::env::args_os(), &mut app_io))
}
