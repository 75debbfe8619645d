pub mod controller;
pub mod spec;
