//! Data types and the native values conversion produces.

mod data_type;
mod value;

pub use data_type::DataType;
pub use value::TypedValue;
