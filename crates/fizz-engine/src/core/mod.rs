pub mod collision;
pub mod integrator;
pub mod time;
pub mod world;
