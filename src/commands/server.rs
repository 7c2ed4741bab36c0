use clap::{ArgMatches, Command};

use crate::api::server as ApiServer;
use crate::config::config::Config;
use crate::session::Session;

pub(crate) fn command_config() -> Command {
    Command::new("server").about("Start the HTTP API")
}

pub(crate) async fn execute(_args: &ArgMatches, configuration: Config) {
    info!("Start server");

    let session = Session::from_config(&configuration);

    ApiServer::start(session, configuration).await;
}
