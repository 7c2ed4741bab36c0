use serde::Deserialize;

use crate::ports::{DEFAULT_PORT_BASE, DEFAULT_PORT_SPAN};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct Omniboard {
    pub(crate) image: String,
    pub(crate) internal_port: u16,
    pub(crate) name_prefix: String,
    pub(crate) port_base: u16,
    pub(crate) port_span: u16,
}

impl Default for Omniboard {
    fn default() -> Self {
        Omniboard {
            image: "vivekratnavel/omniboard".to_string(),
            internal_port: 9000,
            name_prefix: "omniboard_".to_string(),
            port_base: DEFAULT_PORT_BASE,
            port_span: DEFAULT_PORT_SPAN,
        }
    }
}
