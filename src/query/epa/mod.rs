//! The EPA algorithm for penetration depth computation.

pub use self::epa::{Epa, EpaContact, EpaError, EpaOptions};

mod entry;
mod epa;
mod seed;
