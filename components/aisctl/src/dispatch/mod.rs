//! Turns a parsed invocation into a running manager, ingester or playback app.
//!
//! Pipeline: [`request::InvocationRequest`] → [`flags`] translation →
//! [`resolver::AppLocator`] → [`launcher::LaunchPlan`] → [`launcher::launch`].

pub mod error;
pub mod flags;
pub mod launcher;
pub mod request;
pub mod resolver;
