pub mod activity;
pub mod crud;
pub mod server;
