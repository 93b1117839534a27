//! Progress indicators for in-flight exchanges

pub mod reporter;
