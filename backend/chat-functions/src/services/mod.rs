pub mod device_lookup;
pub mod push_delivery;

pub use device_lookup::{usable_tokens, DeviceTokenStore, PgDeviceTokenStore};
pub use push_delivery::{FcmTransport, PushDelivery, PushTransport};
