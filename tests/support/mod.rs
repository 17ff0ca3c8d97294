pub mod mocks;
pub mod processor_stub;
