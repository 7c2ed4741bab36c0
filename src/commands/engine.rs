use clap::{ArgMatches, Command};

use crate::config::config::Config;
use crate::session::Session;

pub(crate) fn command_config() -> Command {
    Command::new("engine").about("Show the Docker executable and whether the engine is running")
}

pub(crate) async fn execute(_args: &ArgMatches, configuration: Config) {
    let session = Session::from_config(&configuration);
    let status = session.runtime().status().await;

    println!("Executable: {}", status.executable);
    match status.version {
        Some(version) => println!("Engine: running ({})", version),
        None => println!("Engine: not running"),
    }
}
