use clap::{value_parser, Arg, ArgMatches, Command};

use crate::commands::connection::{connect, connection_args};
use crate::config::config::Config;
use crate::session::Session;

pub(crate) fn command_config() -> Command {
    Command::new("launch")
        .about("Start an Omniboard container for a database")
        .long_about(
            "Start an Omniboard container for a database. The MongoDB server is contacted first \
             and its databases must be listable (or the URI must name the database); the launch \
             is aborted when that connection fails.",
        )
        .arg(
            Arg::new("database")
                .required(true)
                .help("Database holding the Sacred runs"),
        )
        .arg(
            Arg::new("host-port")
                .long("host-port")
                .help("Host port to publish instead of the one derived from the database name")
                .value_parser(value_parser!(u16)),
        )
        .args(connection_args())
}

pub(crate) async fn execute(args: &ArgMatches, configuration: Config) {
    let mut session = Session::from_config(&configuration);

    if let Err(e) = connect(args, session.resolver_mut(), &configuration).await {
        eprintln!("Error: {}", e.hint());
        std::process::exit(1);
    }

    let database = args.get_one::<String>("database").map(String::as_str).unwrap_or_default();
    let host_port = args.get_one::<u16>("host-port").copied();

    match session.launch(database, host_port).await {
        Ok(instance) => {
            println!("Launched {} for database {}", instance.container, instance.database);
            println!("Port: {}", instance.port);
            println!("Omniboard will be available at {}", instance.url);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    session.resolver().disconnect().await;
}
