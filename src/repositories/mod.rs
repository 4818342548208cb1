// src/repositories/mod.rs

pub mod user_repository;

pub use user_repository::{InMemoryUserRepository, NewUser, UserRepository, UserUpdate};
