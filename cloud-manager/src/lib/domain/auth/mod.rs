pub mod credentials;
pub mod errors;
pub mod issuer;
pub mod models;
pub mod ports;
pub mod service;
pub mod validator;
