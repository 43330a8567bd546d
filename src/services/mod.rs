pub mod automation;
pub mod prompt;
pub mod sse;
