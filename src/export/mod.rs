pub mod ics;

pub use ics::{build_ics, ics_file_name};
