//! The rule engine: parsing, evaluation, combination and storage of
//! boolean eligibility rules kept as ASTs.

pub mod combiner;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod repository;
pub mod service;
