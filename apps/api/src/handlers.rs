pub mod health;
pub mod incidents;
pub mod security;
