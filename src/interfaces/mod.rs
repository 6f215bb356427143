pub mod app;
pub mod components;
pub mod design_system;
