// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent (`.ftl`) files embedded at build time. The active
//! locale is chosen once at startup from the CLI, the config file or the OS.

pub mod fluent;
