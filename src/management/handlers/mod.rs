pub mod integrations;
pub mod system;
