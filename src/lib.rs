pub mod config;
pub mod error;
pub mod fetch;
pub mod http_client;
pub mod normalize;
pub mod pipeline;
pub mod quota;
pub mod ranking;
pub mod store;
pub mod table;
