pub(crate) mod catalog;
pub(crate) mod error;
pub(crate) mod resolver;
pub(crate) mod uri;

pub(crate) use error::ResolverError;
