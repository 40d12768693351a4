pub mod outputs;
pub mod placeholders;
