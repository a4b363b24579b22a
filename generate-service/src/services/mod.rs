pub mod providers;

pub use providers::{ImageProvider, ProviderError, TextProvider};
