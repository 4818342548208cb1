// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod pages;
pub mod profile;
pub mod quiz;
