pub mod level;
pub mod round;
pub mod rules;
