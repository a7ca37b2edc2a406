pub mod forms;
pub mod siteverify;
