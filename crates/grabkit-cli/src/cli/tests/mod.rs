//! CLI parse and output tests.
