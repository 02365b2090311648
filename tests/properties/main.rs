//! Property tests for parsers that take untrusted input.

mod page_range_props;
mod skill_document_props;
