pub mod contact;
pub mod phone;
pub mod table;

pub use contact::{fallback_name, Contact};
pub use phone::{
    normalize, normalize_with, validate, validate_with, CanonicalPhone, PhoneInput, PhonePolicy,
};
pub use table::{CellValue, Table};
