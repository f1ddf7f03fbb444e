//! Station lottery server.
//!
//! A web application that answers: "Pick me a random station I can reach
//! within this much time."

pub mod cache;
pub mod config;
pub mod departure;
pub mod domain;
pub mod draw;
pub mod heartrails;
pub mod lottery;
pub mod regions;
pub mod web;
