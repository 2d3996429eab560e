//! HTML rendering for player and builder pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic escaping. Media URLs reaching these templates
//! have already been sanitized by the pipeline; escaping is a second layer.

pub mod components;
pub mod home;
pub mod player;
