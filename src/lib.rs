//! WinToast - Windows toast notifications behind a small facade
//!
//! Builds toast descriptors, materializes them into the platform's XML
//! templates, shows and retracts them, and routes click, dismissal and
//! failure events back to the caller.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Toast descriptors, sounds, events, ids and errors
//! - **Application**: The `ToastService` facade, materializer and port traits
//! - **Infrastructure**: WinRT platform (Windows), in-memory platform, clock, config store
//! - **CLI**: Command-line interface and argument parsing
//!
//! # Example
//!
//! ```no_run
//! use wintoast::application::ToastHandler;
//! use wintoast::domain::toast::{TemplateKind, ToastTemplate};
//! use wintoast::infrastructure::create_service;
//!
//! let service = create_service("Contoso.Mail");
//! service.initialize()?;
//!
//! let template = ToastTemplate::new(TemplateKind::Text02)
//!     .with_text("New message")
//!     .with_text("Lunch at noon?")
//!     .with_action("Reply");
//! let handler = ToastHandler::new().on_clicked(|action| println!("clicked {action}"));
//! let id = service.show_toast(&template, &handler)?;
//! service.hide_toast(id)?;
//! # Ok::<(), wintoast::domain::error::ToastError>(())
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
