pub mod chars;
pub mod pairs;
pub mod range;
