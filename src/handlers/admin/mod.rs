pub mod accounts;
pub mod auth;
pub mod properties;
pub mod roles;
