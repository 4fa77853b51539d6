pub mod device;
pub mod inbound;
