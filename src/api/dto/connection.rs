use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::connection::{ConnectionMode, CredentialProfile};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConnectMode {
    Port,
    Uri,
    Credentials,
}

#[derive(Deserialize, Validate)]
pub(crate) struct ConnectInput {
    pub(crate) mode: ConnectMode,
    #[validate(range(min = 1))]
    pub(crate) port: Option<u16>,
    pub(crate) uri: Option<String>,
    pub(crate) base_uri: Option<String>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) auth_source: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct ConnectOutput {
    pub(crate) databases: Vec<String>,
    pub(crate) mode: Option<ConnectionMode>,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) profile: Option<CredentialProfile>,
}
