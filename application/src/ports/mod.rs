//! Ports — interfaces implemented by infrastructure adapters

pub mod chat_transport;
pub mod exchange_logger;
