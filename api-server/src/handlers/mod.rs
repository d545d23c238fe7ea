//! HTTP handlers

pub mod health;
pub mod recommend;
pub mod status;
pub mod symptoms;
