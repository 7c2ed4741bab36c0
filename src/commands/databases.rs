use clap::{ArgMatches, Command};

use crate::commands::connection::{connect, connection_args};
use crate::config::config::Config;
use crate::session::Session;

pub(crate) fn command_config() -> Command {
    Command::new("databases")
        .about("List the databases of a MongoDB server")
        .args(connection_args())
}

pub(crate) async fn execute(args: &ArgMatches, configuration: Config) {
    let mut session = Session::from_config(&configuration);

    match connect(args, session.resolver_mut(), &configuration).await {
        Ok(databases) if databases.is_empty() => {
            println!("No databases found");
        }
        Ok(databases) => {
            for database in databases {
                println!("{}", database);
            }
        }
        Err(e) => {
            debug!("{}", e);
            eprintln!("Error: {}", e.hint());
            std::process::exit(1);
        }
    }

    session.resolver().disconnect().await;
}
