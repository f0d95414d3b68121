pub mod engine;
pub mod protocol;
pub mod apply_step;

pub mod calculator;
pub mod translator;

pub mod prompt_builder;
pub mod llm_client;
pub mod step_parser;
