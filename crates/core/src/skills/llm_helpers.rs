//! # LLM Helpers
//!
//! radkit's `LlmFunction` and `LlmWorker` builders need a concrete provider
//! type, not a boxed `BaseLlm`, so provider selection happens once here in a
//! macro and the body is instantiated for each provider.

/// Bind a concrete radkit provider client for `$config` and evaluate `$body` with it.
///
/// Must be used inside a function returning `anyhow::Result`, since client
/// construction failures (missing API key) are propagated with `?`.
#[macro_export]
macro_rules! with_llm {
    ($config:expr, |$llm:ident| $body:expr) => {{
        use radkit::models::providers::{
            AnthropicLlm, DeepSeekLlm, GeminiLlm, GrokLlm, OpenAILlm, OpenRouterLlm,
        };
        use $crate::models::LlmProvider;

        let config = $config;
        match config.provider {
            LlmProvider::Anthropic => {
                let $llm = AnthropicLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::OpenAI => {
                let $llm = match &config.base_url {
                    Some(base_url) => OpenAILlm::from_env(&config.model)?.with_base_url(base_url),
                    None => OpenAILlm::from_env(&config.model)?,
                };
                $body
            }
            LlmProvider::Gemini => {
                let $llm = GeminiLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::OpenRouter => {
                let $llm = OpenRouterLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::Grok => {
                let $llm = GrokLlm::from_env(&config.model)?;
                $body
            }
            LlmProvider::DeepSeek => {
                let $llm = DeepSeekLlm::from_env(&config.model)?;
                $body
            }
        }
    }};
}

/// Run a structured-output `LlmFunction` with any provider.
#[macro_export]
macro_rules! run_llm_function {
    ($config:expr, $output_type:ty, $system_prompt:expr, $input:expr) => {{
        use radkit::agent::LlmFunction;

        let result: anyhow::Result<$output_type> = $crate::with_llm!($config, |llm| {
            let func =
                LlmFunction::<$output_type>::new_with_system_instructions(llm, $system_prompt);
            func.run($input).await.map_err(Into::into)
        });
        result
    }};
}

pub use run_llm_function;
pub use with_llm;
