pub mod model;

pub use model::{Vendor, VendorFields};
