// Domain layer: forecast payload, stream record and the ports the relay talks through.

pub mod model;
pub mod ports;
