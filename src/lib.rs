pub mod accounting;
pub mod args;
pub mod chart;
pub mod data;
pub mod session;
