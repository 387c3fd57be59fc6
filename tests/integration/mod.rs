//! Integration tests for the comments store, listings, and CLI

mod cli_commands;
mod listing_render;
mod support;
