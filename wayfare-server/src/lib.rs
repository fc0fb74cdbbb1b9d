//! Bus trip explorer server.
//!
//! A web application that answers: "Which buses run between these two
//! places on this day, and which is the cheapest or fastest?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod query;
pub mod web;
