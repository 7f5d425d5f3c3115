pub mod atomic_writer;
pub mod json_file_gateway;
#[cfg(test)]
pub mod memory_gateway;

pub use atomic_writer::AtomicWriter;
pub use json_file_gateway::JsonFileGateway;
#[cfg(test)]
pub use memory_gateway::MemoryGateway;
