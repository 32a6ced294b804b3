// Domain layer: the part record and the ports the codecs and the session plug into.

pub mod model;
pub mod ports;
