pub mod agent;
pub mod console;
pub mod tooling;
