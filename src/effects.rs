pub mod composite;
pub mod reveal;
