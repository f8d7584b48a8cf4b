use std::process::ExitCode;

fn main() -> ExitCode {
    supportcrew_cli::run()
}
