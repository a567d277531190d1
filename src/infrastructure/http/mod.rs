// HTTP module - Management service client
pub mod client;

pub use client::RestManagementClient;
