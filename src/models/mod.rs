pub mod user;
pub mod repository;
pub mod event;
pub mod analysis;

pub use user::*;
pub use repository::*;
pub use event::*;
pub use analysis::*;
