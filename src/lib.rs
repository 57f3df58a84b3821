//! Lipiantar - Roman Punjabi to Gurmukhi Library
//!
//! A terminal notes workspace that translates Romanized Punjabi into
//! Gurmukhi through a language model, with a review step before anything
//! reaches the notes.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
