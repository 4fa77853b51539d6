#![cfg_attr(not(test), no_std)]

pub mod packet;
pub mod sensor_id;
