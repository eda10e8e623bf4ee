pub mod figment;
pub mod logging;
pub mod password;

mod sensitive;
pub use sensitive::Sensitive;
