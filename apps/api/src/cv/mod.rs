// CV question answering: keyword taxonomy, section extraction, JSON cache,
// question routing, and the service that ties them together.

pub mod answerer;
pub mod extractor;
pub mod handlers;
pub mod service;
pub mod source;
pub mod store;
pub mod taxonomy;
