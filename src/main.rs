use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error};

use worthit::cli::Args;
use worthit::display::render;
use worthit::error::VALIDATION_EXIT_CODE;
use worthit::pipeline::{run_hook, Outcome};
use worthit::utils::{init_logging, read_stdin};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    let stdin = match read_stdin() {
        Ok(buf) => buf,
        Err(e) => {
            error!(error = %e, "could not read hook input");
            return ExitCode::from(VALIDATION_EXIT_CODE);
        }
    };

    match run_hook(&stdin) {
        Ok(Outcome::Report(report)) => {
            let line = render(&report, args.format);
            // A closed pipe on the notifier side is not worth a popup.
            if let Err(e) = writeln!(std::io::stdout().lock(), "{line}") {
                debug!(error = %e, "stdout closed");
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Silent(reason)) => {
            debug!(?reason, "nothing to report");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(VALIDATION_EXIT_CODE)
        }
    }
}
