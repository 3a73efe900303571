//! Shared test utilities and fixtures
