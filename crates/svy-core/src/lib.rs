//! Labeled survey frames.
//!
//! This crate pairs a survey response table with its parsed metadata:
//! loading (`load_survey`), multi-response expansion, and the
//! [`LabeledFrame`] container with its label accessors.

mod error;
mod expand;
mod frame;
mod pipeline;

pub use error::{CoreError, Result};
pub use expand::expand_multi_responses;
pub use frame::LabeledFrame;
pub use pipeline::load_survey;
