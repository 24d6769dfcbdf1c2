//! HTTP adapter for the prompt and reset endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatResponse, ErrorResponse, HealthResponse, MessageResponse, PromptRequest};
pub use handlers::{
    PromptApiError, PromptAppState, CLEAR_FAILED_MESSAGE, MISSING_FIELDS_MESSAGE,
    PROMPT_FAILED_MESSAGE,
};
pub use routes::prompt_router;
