pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod report;

pub use providers::{
    GeminiProvider, GenerationProvider, MessagingProvider, MockGenerationProvider,
    MockMessagingProvider, ProviderError, TelegramProvider,
};
