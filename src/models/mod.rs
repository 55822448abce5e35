pub mod advisory;
pub mod crop;
pub mod forecast;
pub mod soil;
pub mod weather;

pub use advisory::*;
pub use crop::*;
pub use forecast::*;
pub use soil::*;
pub use weather::*;
