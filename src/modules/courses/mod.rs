pub mod controller;
pub mod overview;
pub mod router;
pub mod service;
