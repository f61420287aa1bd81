//! Matching-engine test suite.
