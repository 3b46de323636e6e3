mod stock {
    pub mod aggregate;
    pub mod count;
    pub mod par;
}
mod report {
    pub mod cache;
    pub mod pdf;
}
mod web {
    pub mod pages;
    pub mod routes;
}
mod catalog;
mod config;
mod constants;
mod error;

pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use report::*;
pub use stock::*;
pub use web::*;

pub use report::cache::ReportCache;
pub use stock::aggregate::{aggregate, Aggregate, PairKey, PairedDisplay, PerBarNeeds, Quantity};
pub use stock::count::{parse_submission, CountEntry, CountKey};
pub use stock::par::get_par;
