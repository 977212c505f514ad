pub mod prelude;

pub mod gyms;
