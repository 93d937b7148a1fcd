//! # LLM Helpers
//!
//! Shared macro for running an LlmWorker against any configured provider.
//! Keeps the provider matching in one place instead of repeating it in
//! every pipeline skill.

/// Macro to run an LlmWorker with any provider and an optional tool list.
/// Pass zero or more `#[tool]` functions after the input expression.
#[macro_export]
macro_rules! run_llm_worker {
    ($config:expr, $output_type:ty, $system_prompt:expr, $input:expr $(, $tool:expr)* $(,)?) => {{
        use radkit::agent::LlmWorker;
        use radkit::models::providers::{
            AnthropicLlm, DeepSeekLlm, GeminiLlm, GrokLlm, OpenAILlm, OpenRouterLlm,
        };
        use $crate::models::LlmProvider;

        let config = $config;
        let result: anyhow::Result<$output_type> = match config.provider {
            LlmProvider::OpenRouter => {
                let llm = OpenRouterLlm::from_env(&config.model)?;
                let worker = LlmWorker::<$output_type>::builder(llm)
                    .with_system_instructions($system_prompt)
                    $(.with_tool($tool))*
                    .build();
                worker.run($input).await.map_err(Into::into)
            }
            LlmProvider::OpenAI => {
                let mut llm = OpenAILlm::from_env(&config.model)?;
                if let Some(base_url) = &config.base_url {
                    llm = llm.with_base_url(base_url);
                }
                let worker = LlmWorker::<$output_type>::builder(llm)
                    .with_system_instructions($system_prompt)
                    $(.with_tool($tool))*
                    .build();
                worker.run($input).await.map_err(Into::into)
            }
            LlmProvider::Anthropic => {
                let llm = AnthropicLlm::from_env(&config.model)?;
                let worker = LlmWorker::<$output_type>::builder(llm)
                    .with_system_instructions($system_prompt)
                    $(.with_tool($tool))*
                    .build();
                worker.run($input).await.map_err(Into::into)
            }
            LlmProvider::Gemini => {
                let llm = GeminiLlm::from_env(&config.model)?;
                let worker = LlmWorker::<$output_type>::builder(llm)
                    .with_system_instructions($system_prompt)
                    $(.with_tool($tool))*
                    .build();
                worker.run($input).await.map_err(Into::into)
            }
            LlmProvider::Grok => {
                let llm = GrokLlm::from_env(&config.model)?;
                let worker = LlmWorker::<$output_type>::builder(llm)
                    .with_system_instructions($system_prompt)
                    $(.with_tool($tool))*
                    .build();
                worker.run($input).await.map_err(Into::into)
            }
            LlmProvider::DeepSeek => {
                let llm = DeepSeekLlm::from_env(&config.model)?;
                let worker = LlmWorker::<$output_type>::builder(llm)
                    .with_system_instructions($system_prompt)
                    $(.with_tool($tool))*
                    .build();
                worker.run($input).await.map_err(Into::into)
            }
        };
        result
    }};
}
