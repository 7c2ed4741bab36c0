use clap::Command;

#[macro_use]
extern crate log;
extern crate env_logger;

mod commands {
    pub(crate) mod clear;
    pub(crate) mod connection;
    pub(crate) mod databases;
    pub(crate) mod engine;
    pub(crate) mod instances;
    pub(crate) mod launch;
    pub(crate) mod server;
}

mod models {
    pub(crate) mod connection;
    pub(crate) mod instances;
}

mod config {
    pub(crate) mod api;
    pub(crate) mod config;
    pub(crate) mod engine;
    pub(crate) mod mongo;
    pub(crate) mod omniboard;
}

mod api;
mod mongo;
mod ports;
mod runtime;
mod session;

#[cfg(test)]
mod fixtures;

fn cli() -> Command {
    Command::new("omniboard-launcher")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Launch Omniboard dashboards for the Sacred runs stored in MongoDB")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(commands::databases::command_config())
        .subcommand(commands::launch::command_config())
        .subcommand(commands::instances::command_config())
        .subcommand(commands::clear::command_config())
        .subcommand(commands::engine::command_config())
        .subcommand(commands::server::command_config())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let matches = cli().get_matches();
    let config = config::config::load_config();

    match matches.subcommand() {
        Some(("databases", sub_matches)) => commands::databases::execute(sub_matches, config).await,
        Some(("launch", sub_matches)) => commands::launch::execute(sub_matches, config).await,
        Some(("instances", sub_matches)) => commands::instances::execute(sub_matches, config).await,
        Some(("clear", sub_matches)) => commands::clear::execute(sub_matches, config).await,
        Some(("engine", sub_matches)) => commands::engine::execute(sub_matches, config).await,
        Some(("server", sub_matches)) => commands::server::execute(sub_matches, config).await,
        _ => unreachable!("a subcommand is required"),
    }
}
