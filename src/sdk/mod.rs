pub mod app;
pub mod command;
pub mod config;
pub mod fare;
pub mod map;
pub mod routing;
pub mod session;
pub mod trip;
pub mod util;
