#![doc = "Command/response protocol surface for the sedh key-agreement device."]

pub mod command;
pub mod device;
pub mod status;

pub use command::{Command, ParamSelector, Response};
pub use device::Device;
pub use status::StatusWord;
