pub mod compute;
pub mod data;
pub mod surface;
pub mod timing;
pub mod util;
