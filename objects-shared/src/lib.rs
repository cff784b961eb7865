pub mod fixture;
pub mod object;
