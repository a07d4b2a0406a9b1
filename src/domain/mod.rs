//! Profile resource and the typed requests and responses flowing through the transport.

pub mod profile;
