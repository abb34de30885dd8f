#![allow(dead_code)]

pub mod fixtures;

pub use app_builder::create_test_app;
