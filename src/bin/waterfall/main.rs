#[macro_use]
extern crate log;

use env_logger::{Builder, Target};

mod cli;
use cli::Cli;

use sonar_waterfall::prelude::Waterfall;

pub fn main() {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();

    let cfg = match cli.config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        },
    };

    info!("{:#?}", cfg);

    let waterfall = match Waterfall::new(&cfg) {
        Ok(waterfall) => waterfall,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        },
    };

    let inputs = cli.inputs();
    let results = waterfall.process_batch(&inputs);

    let failures = results.iter().filter(|result| result.is_err()).count();
    info!(
        "{} waterfall(s) created, {} failure(s)",
        results.len() - failures,
        failures
    );

    if failures == results.len() {
        std::process::exit(1);
    }
}
