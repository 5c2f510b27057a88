//! Interfaces layer: transports exposing the application services

pub mod http;
