// Domain layer: report models and the pipeline port. No I/O here.

pub mod model;
pub mod ports;
