pub mod intraday;
pub mod response;

pub use intraday::*;
pub use response::*;
