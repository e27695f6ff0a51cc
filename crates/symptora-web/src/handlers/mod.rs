//! HTTP handlers for all web routes.

pub mod sms;
pub mod system;
pub mod webhook;
