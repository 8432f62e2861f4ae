//! Configuration for the inkpost API.
//!
//! Each submodule owns one concern and loads itself from environment
//! variables with development-friendly defaults:
//!
//! - [`cors`]: allowed origins for the CORS layer
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP settings for outbound notifications
//! - [`jwt`]: token secrets, lifetimes, issuer and audience
//! - [`lockout`]: failed-login threshold and lock duration
//! - [`two_factor`]: one-time code time-to-live

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod lockout;
pub mod two_factor;
