mod completion_client;

pub use completion_client::{
    CompletionClient, DEFAULT_COMPLETION_API, MISSING_CREDENTIAL, NO_CONTENT,
};
