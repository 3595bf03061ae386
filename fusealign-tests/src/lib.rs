//! Integration tests for the fusealign workspace live in `tests/`.
