pub mod directory;
pub mod localization;
pub mod messaging;
pub mod sms;
