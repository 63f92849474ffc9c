pub mod ipc;

pub use ipc::IngestOutput;
