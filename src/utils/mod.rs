// src/utils/mod.rs

pub mod flash;
pub mod html;
pub mod json_file;
pub mod password;
pub mod session;
pub mod time;
