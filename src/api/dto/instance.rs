use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub(crate) struct LaunchInput {
    #[validate(length(min = 1, max = 64))]
    pub(crate) database: String,
    #[validate(range(min = 1))]
    pub(crate) host_port: Option<u16>,
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct ClearOutput {
    pub(crate) removed: usize,
}
