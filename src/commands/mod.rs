pub mod branches;
pub mod log;
