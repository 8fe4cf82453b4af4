pub mod form;
pub mod task;
