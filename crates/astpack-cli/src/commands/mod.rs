pub mod dump;
pub mod encode;
pub mod input;
