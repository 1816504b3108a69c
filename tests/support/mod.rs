#![allow(dead_code)]

pub mod config_env;
pub mod http_stub;
