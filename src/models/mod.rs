pub mod entities;
pub mod message;
pub mod request;
pub mod result;
pub mod template;
pub mod validation;
