pub mod automation;
pub mod search;
