// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of the pure blob aggregate that must hold for every generated
//! event stream and tag command.

mod command_handling;
mod event_application;
