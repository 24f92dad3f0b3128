pub mod reference;
pub mod regex;
