mod cli;

use clap::Parser;
use fieldmap::MapperError;
use std::env;

fn main() -> Result<(), MapperError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "fieldmap=warn");
        }
    }
    env_logger::init();

    let cli = cli::Cli::parse();
    cli::run(cli)
}
