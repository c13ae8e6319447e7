mod batch_cli;
mod completion_cache;
mod navigation;
mod prompt_rendering;
mod support;
