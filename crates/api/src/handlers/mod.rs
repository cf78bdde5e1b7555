pub mod breed;
pub mod cat;
pub mod developer;
pub mod fact;
