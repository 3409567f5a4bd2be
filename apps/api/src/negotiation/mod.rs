//! Negotiation coaching: message classification, tip retrieval and reply
//! composition.

pub mod classifier;
pub mod coach;
pub mod handlers;
pub mod selector;
pub mod store;
pub mod tips;
