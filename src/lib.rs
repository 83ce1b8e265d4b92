// Biblioteca raíz del crate `secretaria`.
// Reexporta los módulos de datos, la lógica de las pantallas y el servidor.
pub mod algorithm;
pub mod chart;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod models;
pub mod repository;
pub mod server;
pub mod server_handlers;
pub mod session;
pub mod views;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
