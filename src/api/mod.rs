pub(crate) mod action {
    pub(crate) mod connect;
    pub(crate) mod engine;
    pub(crate) mod healthz;
    pub(crate) mod instances;
}

pub(crate) mod dto {
    pub(crate) mod connection;
    pub(crate) mod instance;
}

pub(crate) mod server;
