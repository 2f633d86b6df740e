//! # httpreq Main Entry Point

use std::process::ExitCode;

use httpreq::{error::USAGE_EXIT_CODE, logging, CommandLineArgs};

fn main() -> ExitCode {
    let args = CommandLineArgs::parse();
    logging::init(args.verbose());

    if args.url().is_empty() {
        println!("{}", CommandLineArgs::usage());
        return exit_code(USAGE_EXIT_CODE);
    }

    let stdout = std::io::stdout();
    match httpreq::run(&args, stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code(e.exit_code())
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
