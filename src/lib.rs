// src/lib.rs

//! Casino Catalog Library

pub mod admin;
pub mod engine;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod records;
pub mod services;
pub mod storage;
pub mod utils;
