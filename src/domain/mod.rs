// Domain layer: entities, ports and business rules. No I/O lives here.

pub mod model;
pub mod ports;
pub mod services;
