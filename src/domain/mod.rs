mod by_service;
mod date;
mod money;
mod payment;
mod reminder;

pub use by_service::*;
pub use date::*;
pub use money::*;
pub use payment::*;
pub use reminder::*;
