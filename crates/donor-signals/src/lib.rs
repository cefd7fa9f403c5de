//! Donor signal derivation and discovery ranking for charity evaluations.
//!
//! [`signals`] converts a raw evaluation record into a versioned [`signals::SignalBundle`];
//! [`discovery`] filters and ranks charities against presets and donor intents using those
//! bundles. Both are pure and synchronous.

pub mod config;
pub mod discovery;
pub mod error;
pub mod signals;
pub mod telemetry;
