//! Runtime module — startup: logging, config, secrets.

pub mod boot;
