#![doc = "Diffie-Hellman key-agreement engine for secure-element style devices."]

pub mod aes;
pub mod buffer;
pub mod kex;
pub mod modexp;
pub mod provider;
