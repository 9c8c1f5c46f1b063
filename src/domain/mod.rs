// Domain layer: the lookup record and the ports the utility talks to.

pub mod model;
pub mod ports;
