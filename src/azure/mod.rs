pub mod client;

pub use client::FormRecognizerClient;
