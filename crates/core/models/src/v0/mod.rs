mod reports;

pub use reports::*;
