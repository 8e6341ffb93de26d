pub mod draft;
pub mod planner;
pub mod session;
pub mod status;
