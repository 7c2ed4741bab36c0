use clap::{ArgMatches, Command};
use cli_table::{print_stdout, Table, WithTitle};

use crate::config::config::Config;
use crate::session::Session;

pub(crate) fn command_config() -> Command {
    Command::new("instances").about("List the Omniboard containers known to Docker")
}

#[derive(Table)]
struct InstanceTableItem {
    #[table(title = "Container ID")]
    id: String,
}

pub(crate) async fn execute(_args: &ArgMatches, configuration: Config) {
    let session = Session::from_config(&configuration);

    let ids = match session.runtime().try_list_managed().await {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if ids.is_empty() {
        println!("No Omniboard containers");
        return;
    }

    let items: Vec<InstanceTableItem> = ids.into_iter().map(|id| InstanceTableItem { id }).collect();

    if let Err(e) = print_stdout(items.with_title()) {
        error!("Unable to print containers: {}", e);
    }
}
