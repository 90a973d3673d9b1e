// Library exports for the sports console
// The binary is a thin shell over these modules

pub mod api;
pub mod commands;
pub mod config;
pub mod guard;
pub mod mock;
pub mod models;
pub mod services;
pub mod session;
pub mod views;
