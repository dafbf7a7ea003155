pub mod config;
pub use self::config::Config;

pub mod data;
pub mod logging;
pub mod poise;
pub mod secrets;
