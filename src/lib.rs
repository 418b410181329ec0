// lib.rs

//! # Mailframe
//!
//! JSON-driven HTML email templates. A template is a JSON object with optional
//! sections (header, hero, title, body, snapshot, visual, actions, support,
//! footer) plus a theme. Any string inside it may contain
//! `{{variable|fallback}}` tokens.
//!
//! ```rust
//! use mailframe::render::Renderer;
//! use mailframe::template::VariableValues;
//! use serde_json::json;
//!
//! let template = json!({ "title": { "text": "Hello {{name|Friend}}" } });
//! let email = Renderer::new().render(&template, &VariableValues::new()).unwrap();
//! assert!(email.html.contains("Hello Friend"));
//! ```

pub mod app;
pub mod commands;
pub mod error;
pub mod input;
pub mod render;
pub mod template;
pub mod utils;
