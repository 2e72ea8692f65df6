mod library;
mod record;

pub use self::library::{Library, derive_groups};
pub use self::record::{Field, Record, group_of};
