//! Row data model

mod key;
mod record;
mod row;
mod value;

pub use key::*;
pub use record::*;
pub use row::*;
pub use value::*;
