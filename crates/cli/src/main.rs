// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! TLS baseline regression harness entry point.

use clap::Parser;
use log::error;

use tlsbase::cli::Cli;
use tlsbase::config::HarnessConfig;
use tlsbase::harness::Harness;
use tlsbase::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let config = match HarnessConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let outcome = Harness::new(config).run().await;
    std::process::exit(outcome.exit_code());
}
