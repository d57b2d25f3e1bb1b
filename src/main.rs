use std::process::ExitCode;

fn main() -> ExitCode {
    match benchpro::entry::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
