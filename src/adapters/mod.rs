pub mod resolver;
pub mod tcp_client;
