use std::error::Error as _;
use std::process::ExitCode;

use clap::Parser;

use text2png::Args;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.into_config().and_then(|config| text2png::run(&config)) {
        Ok(_) => {
            println!("Ok.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
