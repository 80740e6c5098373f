pub mod model;

pub use model::{Enquiry, NewEnquiry};
