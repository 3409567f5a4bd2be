//! Pure salary analytics: the market gap verdict and the lifetime impact
//! projection, plus their HTTP handlers.

pub mod gap;
pub mod handlers;
pub mod lifetime;
