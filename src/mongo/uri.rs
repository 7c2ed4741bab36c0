use url::form_urlencoded;
use url::Url;

use crate::models::connection::{DEFAULT_HOST, DEFAULT_PORT};
use crate::mongo::error::ResolverError;

pub(crate) const DEFAULT_SCHEME: &str = "mongodb://";
const SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Borrowed view of a MongoDB connection string. Pieces are kept verbatim.
#[derive(Debug, PartialEq)]
struct UriParts<'a> {
    scheme: &'static str,
    userinfo: Option<&'a str>,
    hosts: &'a str,
    path: &'a str,
    query: Option<&'a str>,
}

impl<'a> UriParts<'a> {
    fn split(uri: &'a str) -> Option<Self> {
        let (scheme, rest) = SCHEMES
            .iter()
            .find_map(|scheme| uri.strip_prefix(scheme).map(|rest| (*scheme, rest)))?;

        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(authority_end);

        let (userinfo, hosts) = match authority.rsplit_once('@') {
            Some((userinfo, hosts)) => (Some(userinfo), hosts),
            None => (None, authority),
        };

        let (path, query) = match tail.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (tail, None),
        };

        Some(UriParts {
            scheme,
            userinfo,
            hosts,
            path: path.strip_prefix('/').unwrap_or(path),
            query,
        })
    }

    fn assemble(&self) -> String {
        let mut uri = String::from(self.scheme);
        if let Some(userinfo) = self.userinfo {
            uri.push_str(userinfo);
            uri.push('@');
        }
        uri.push_str(self.hosts);
        uri.push('/');
        uri.push_str(self.path);
        if let Some(query) = self.query {
            uri.push('?');
            uri.push_str(query);
        }
        uri
    }
}

pub(crate) fn has_scheme(uri: &str) -> bool {
    SCHEMES.iter().any(|scheme| uri.starts_with(scheme))
}

/// Prepends `mongodb://` when no known scheme is present.
pub(crate) fn ensure_scheme(uri: &str) -> String {
    if has_scheme(uri) {
        uri.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, uri)
    }
}

/// Host, port and database of a connection string. Seed lists report their first host,
/// anything unparsable reports the defaults.
pub(crate) fn parse_target(uri: &str) -> (String, u16, Option<String>) {
    let Some(parts) = UriParts::split(uri) else {
        return (DEFAULT_HOST.to_string(), DEFAULT_PORT, None);
    };

    let first_host = parts.hosts.split(',').next().unwrap_or_default();
    let url = Url::parse(&format!("{}{}/", DEFAULT_SCHEME, first_host)).ok();

    let host = url
        .as_ref()
        .and_then(|url| url.host_str())
        .filter(|host| !host.is_empty())
        .unwrap_or(DEFAULT_HOST)
        .to_string();
    let port = url.as_ref().and_then(Url::port).unwrap_or(DEFAULT_PORT);

    let database = urlencoding::decode(parts.path)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| parts.path.to_string());
    let database = Some(database).filter(|name| !name.is_empty());

    (host, port, database)
}

/// Forces `/<database>` as the URI path. User-info, hosts and query are copied verbatim;
/// the host is never rewritten.
pub(crate) fn with_database(uri: &str, database: &str) -> String {
    match UriParts::split(uri) {
        Some(parts) => UriParts { path: database, ..parts }.assemble(),
        None => uri.to_string(),
    }
}

/// Injects percent-encoded credentials as user-info (replacing any present) and adds
/// `authSource` unless the query already names one.
pub(crate) fn with_credentials(
    base_uri: &str,
    username: &str,
    password: &str,
    auth_source: &str,
) -> Result<String, ResolverError> {
    let base_uri = ensure_scheme(base_uri.trim());
    let parts = UriParts::split(&base_uri)
        .ok_or_else(|| ResolverError::Input(format!("Unsupported connection URI: {}", base_uri)))?;

    if parts.hosts.is_empty() {
        return Err(ResolverError::Input("Connection URI has no host".to_string()));
    }

    let userinfo = format!("{}:{}", urlencoding::encode(username), urlencoding::encode(password));

    let has_auth_source = parts
        .query
        .map(|query| {
            form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key.eq_ignore_ascii_case("authSource"))
        })
        .unwrap_or(false);

    let query = if has_auth_source || auth_source.is_empty() {
        parts.query.map(str::to_string)
    } else {
        let addition = form_urlencoded::Serializer::new(String::new())
            .append_pair("authSource", auth_source)
            .finish();
        match parts.query.filter(|query| !query.is_empty()) {
            Some(query) => Some(format!("{}&{}", query, addition)),
            None => Some(addition),
        }
    };

    Ok(UriParts {
        userinfo: Some(&userinfo),
        query: query.as_deref(),
        ..parts
    }
    .assemble())
}
