pub mod controller;
pub mod lockout;
pub mod model;
pub mod router;
pub mod service;
pub mod two_factor;
