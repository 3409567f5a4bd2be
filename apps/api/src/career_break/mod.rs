//! Career-break cash drain simulation.

pub mod handlers;
pub mod impact;
pub mod sandbox;
pub mod simulator;
