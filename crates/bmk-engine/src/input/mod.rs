pub mod control;
pub mod queue;
