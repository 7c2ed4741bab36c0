pub(crate) mod docker;
pub(crate) mod error;
pub(crate) mod runtime;

pub(crate) use error::RuntimeError;
