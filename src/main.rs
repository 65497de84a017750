use std::process::ExitCode;

fn main() -> ExitCode {
    ipfolio::cli::run()
}
