pub mod backend;
pub mod config;
pub mod manifest;
pub mod resolver;
pub mod routes;
pub mod state;
