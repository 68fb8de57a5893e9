//! Core aggregation logic for mdaggregate.
//!
//! This crate ties together scanning, grouping, heading rewriting, and
//! document writing into one end-to-end workflow ([`pipeline::aggregate`]).

pub mod grouper;
pub mod pipeline;
pub mod scanner;
pub mod writer;
