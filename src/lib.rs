/*!
 * # ass2srt - Advanced SubStation Alpha to SubRip converter
 *
 * A Rust library for turning ASS subtitle scripts into plain SRT files.
 *
 * ## Features
 *
 * - Single-pass conversion of the `[Events]` section's `Dialogue:` lines
 * - Override tag stripping and `\N` line break expansion
 * - Optional skipping of malformed lines instead of aborting
 * - Optional rescaling of centisecond timestamps to real milliseconds
 * - Batch conversion of whole directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `ass_converter`: The line scanner and text clean-up
 * - `subtitle_processor`: SRT cue model and serialization
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations and document sources/sinks
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod ass_converter;
pub mod subtitle_processor;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, ConversionOptions, MalformedLinePolicy, SectionMode, TimestampMode};
pub use ass_converter::{Converter, ConversionReport};
pub use subtitle_processor::{SrtDocument, SubtitleCue};
pub use app_controller::Controller;
pub use errors::ConversionError;
