use clap::{value_parser, Arg, ArgMatches};
use secrecy::SecretString;
use std::env;

use crate::config::config::Config;
use crate::mongo::resolver::MongoResolver;
use crate::mongo::ResolverError;

pub(crate) const DEFAULT_PASSWORD_VARIABLE: &str = "MONGO_PASSWORD";

/// MongoDB connection flags shared by every subcommand that needs a database.
pub(crate) fn connection_args() -> Vec<Arg> {
    vec![
        Arg::new("port")
            .long("port")
            .short('p')
            .help("Port of a MongoDB server on localhost")
            .value_parser(value_parser!(u16))
            .conflicts_with_all(["uri", "base-uri"]),
        Arg::new("uri")
            .long("uri")
            .help("Full MongoDB connection URI (empty uses MONGO_DEFAULT_URL)")
            .conflicts_with("base-uri"),
        Arg::new("base-uri")
            .long("base-uri")
            .help("Connection URI without credentials")
            .requires("username"),
        Arg::new("username")
            .long("username")
            .short('u')
            .requires("base-uri"),
        Arg::new("password-env")
            .long("password-env")
            .help("Environment variable holding the password")
            .default_value(DEFAULT_PASSWORD_VARIABLE),
        Arg::new("auth-source")
            .long("auth-source")
            .default_value("admin"),
    ]
}

fn read_password(variable: &str) -> Result<SecretString, ResolverError> {
    env::var(variable)
        .map(SecretString::from)
        .map_err(|_| ResolverError::Input(format!("Environment variable {} is not set", variable)))
}

/// Connects `resolver` the way the flags ask for: credentials, then URI, then local port.
pub(crate) async fn connect(
    args: &ArgMatches,
    resolver: &mut MongoResolver,
    configuration: &Config,
) -> Result<Vec<String>, ResolverError> {
    if let Some(base_uri) = args.get_one::<String>("base-uri") {
        let username = args.get_one::<String>("username").map(String::as_str).unwrap_or_default();
        let variable = args
            .get_one::<String>("password-env")
            .map(String::as_str)
            .unwrap_or(DEFAULT_PASSWORD_VARIABLE);
        let auth_source = args.get_one::<String>("auth-source").map(String::as_str).unwrap_or("admin");

        let password = read_password(variable)?;
        return resolver
            .connect_by_credential_parts(base_uri, username, &password, auth_source)
            .await;
    }

    if let Some(uri) = args.get_one::<String>("uri") {
        let uri = if uri.trim().is_empty() { &configuration.mongo.default_url } else { uri };
        return resolver.connect_by_uri(uri).await;
    }

    let port = args.get_one::<u16>("port").copied().unwrap_or(configuration.mongo.port);
    resolver.connect_by_port(port).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::catalog::ScriptedCatalog;
    use clap::Command;
    use std::sync::Arc;
    use std::time::Duration;

    fn matches(argv: &[&str]) -> ArgMatches {
        Command::new("databases")
            .args(connection_args())
            .try_get_matches_from(argv)
            .unwrap()
    }

    fn resolver(catalog: &ScriptedCatalog) -> MongoResolver {
        MongoResolver::new(Arc::new(catalog.clone()), "localhost", Duration::from_secs(3))
    }

    #[tokio::test]
    async fn test_defaults_to_configured_port() {
        let catalog = ScriptedCatalog::listing(&["admin"]);
        let mut resolver = resolver(&catalog);

        connect(&matches(&["databases"]), &mut resolver, &Config::default()).await.unwrap();

        assert_eq!(catalog.seen(), vec!["mongodb://localhost:27017/"]);
    }

    #[tokio::test]
    async fn test_uri_flag() {
        let catalog = ScriptedCatalog::listing(&["admin"]);
        let mut resolver = resolver(&catalog);

        connect(&matches(&["databases", "--uri", "db.example.com:27020/runs"]), &mut resolver, &Config::default())
            .await
            .unwrap();

        assert_eq!(catalog.seen(), vec!["mongodb://db.example.com:27020/runs"]);
    }

    #[tokio::test]
    async fn test_missing_password_variable() {
        let mut resolver = resolver(&ScriptedCatalog::listing(&[]));
        let args = matches(&[
            "databases",
            "--base-uri",
            "db.example.com",
            "--username",
            "alice",
            "--password-env",
            "OMNIBOARD_LAUNCHER_TEST_UNSET_PASSWORD",
        ]);

        let result = connect(&args, &mut resolver, &Config::default()).await;

        assert!(matches!(result, Err(ResolverError::Input(_))));
    }

    #[test]
    fn test_port_conflicts_with_uri() {
        let result = Command::new("databases")
            .args(connection_args())
            .try_get_matches_from(["databases", "--port", "27017", "--uri", "mongodb://localhost"]);

        assert!(result.is_err());
    }
}
