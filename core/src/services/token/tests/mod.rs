//! Unit tests for the token service

mod helpers;
