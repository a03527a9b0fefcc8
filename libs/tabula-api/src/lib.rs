pub mod converter;
pub mod driver;
pub mod error;
pub mod value;

pub use converter::{convert, is_tagged, DefaultConverter, ValueConverter};
pub use driver::{DriverValue, Nullable};
pub use error::{ConvertError, ErrorKind};
pub use value::{Row, Value};
