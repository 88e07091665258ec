pub mod price;
pub mod signals;
pub mod trade;

pub use price::*;
pub use signals::*;
pub use trade::*;
