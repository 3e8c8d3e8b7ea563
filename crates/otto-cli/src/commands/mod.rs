pub mod config;
pub mod dial;
pub mod generate;
pub mod plan;
pub mod profile;
pub mod reset;
pub mod route;
pub mod score;
pub mod session;
pub mod today;
