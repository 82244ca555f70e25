//! Static Model Catalogs
//!
//! Vendor-curated model lists per provider. Listing never requires the
//! provider to be fully configured and never makes a network call.

use super::types::{ModelInfo, ProviderType};

fn openai_models() -> Vec<ModelInfo> {
    vec![
        // GPT-5 family (latest reasoning-capable models)
        ModelInfo::new(
            "gpt-5.1",
            "Latest GPT-5.1 flagship for complex reasoning and coding tasks",
        ),
        ModelInfo::new("gpt-5", "Previous GPT-5 flagship reasoning model"),
        ModelInfo::new("gpt-5-mini", "Cost-optimized GPT-5 mini model"),
        ModelInfo::new("gpt-5-nano", "High-throughput GPT-5 nano model"),
        // GPT-4 family
        ModelInfo::new("gpt-4o-mini", "Latest GPT-4o mini for general reasoning"),
        ModelInfo::new("gpt-4.1-mini", "GPT-4.1 mini tier"),
        ModelInfo::new("o4-mini", "Reasoning optimized o4-mini"),
        ModelInfo::new("gpt-4o", "Full GPT-4o"),
        ModelInfo::new("gpt-4.1", "Full GPT-4.1"),
    ]
}

fn openrouter_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("openai/gpt-5", "GPT-5 family routed via OpenRouter"),
        ModelInfo::new("anthropic/claude-4.5-sonnet", "Claude 4.5 Sonnet via OpenRouter"),
        ModelInfo::new("google/gemini-2.5-pro", "Gemini 2.5 Pro via OpenRouter"),
        ModelInfo::new("google/gemini-2.5-flash", "Gemini 2.5 Flash via OpenRouter"),
        ModelInfo::new("google/gemini-2.0-flash", "Gemini 2.0 Flash via OpenRouter"),
        ModelInfo::new("openai/gpt-4o-mini", "GPT-4o mini from OpenRouter catalog"),
        ModelInfo::new(
            "meta-llama/llama-3.1-70b-instruct",
            "Llama 3.1 70B Instruct via OpenRouter",
        ),
        ModelInfo::new("x-ai/grok-code-fast-1", "Grok Code Fast 1 via OpenRouter"),
        ModelInfo::new("x-ai/grok-4-fast", "Grok 4 Fast via OpenRouter"),
        ModelInfo::new("minimax/minimax-m2", "Minimax M2 via OpenRouter"),
        ModelInfo::new("z-ai/glm-4.6", "GLM 4.6 via OpenRouter"),
    ]
}

fn gemini_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("gemini-2.5-pro", "Most capable Gemini 2.5 Pro"),
        ModelInfo::new("gemini-2.5-flash", "Flash"),
    ]
}

/// Returns the provider-specific model catalog.
pub fn model_catalog(provider: ProviderType) -> Vec<ModelInfo> {
    match provider {
        ProviderType::OpenAI => openai_models(),
        ProviderType::OpenRouter => openrouter_models(),
        ProviderType::Gemini => gemini_models(),
    }
}
