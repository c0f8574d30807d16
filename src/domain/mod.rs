pub mod form;
pub mod notification;
pub mod order;
pub mod timestamp;

pub use form::*;
pub use notification::*;
pub use order::*;
