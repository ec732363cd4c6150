pub mod payment;
pub mod review;
pub mod session;
pub mod space;
pub mod user;
pub mod vehicle;

pub use payment::*;
pub use review::*;
pub use session::*;
pub use space::*;
pub use user::*;
pub use vehicle::*;
