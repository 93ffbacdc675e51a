//! Library side of the `eatout` command: logging, configuration, views and
//! rendering.

pub mod export;
pub mod logging;
pub mod session;
pub mod summary;
pub mod views;
