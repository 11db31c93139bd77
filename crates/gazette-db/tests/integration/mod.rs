pub mod common;
mod settings_tests;
mod user_tests;
