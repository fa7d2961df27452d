pub mod account;
pub mod draft;
pub mod error;
pub mod fields;
pub mod notice;
pub mod palette;
pub mod repo;
pub mod service;
pub mod session;
pub mod taxonomy;
pub mod wizard;

#[cfg(test)]
mod account_test;
