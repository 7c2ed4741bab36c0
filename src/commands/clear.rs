use clap::{ArgMatches, Command};

use crate::config::config::Config;
use crate::session::Session;

pub(crate) fn command_config() -> Command {
    Command::new("clear").about("Force-remove every Omniboard container")
}

pub(crate) async fn execute(_args: &ArgMatches, configuration: Config) {
    let mut session = Session::from_config(&configuration);

    match session.clear().await {
        0 => println!("No Omniboard containers to remove"),
        removed => println!("Removed {} Omniboard container(s)", removed),
    }
}
