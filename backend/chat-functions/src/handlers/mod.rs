/// HTTP handlers for the callable operations
pub mod devices;
pub mod push;
pub mod rtc;

pub use devices::register_routes as register_devices;
pub use push::register_routes as register_push;
pub use rtc::register_routes as register_rtc;
