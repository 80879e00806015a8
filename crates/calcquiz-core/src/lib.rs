//! calcquiz-core: Answer evaluation, error diagnosis and session state.
//!
//! This crate defines the question model, the payload parser, the
//! correctness check, the topic cascades that diagnose wrong answers, the
//! session state machine and the final scoring. It performs no I/O of its
//! own beyond reading local payload files; fetching and persisting go
//! through the traits in [`traits`].

pub mod diagnosis;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod score;
pub mod session;
pub mod traits;
