//! Validation of raw text entered on the settings page.
//!
//! Input arrives as free text from a text field.  Nothing typed by the user
//! reaches the [`Settings`](crate::Settings) record until it passes a check
//! in this module.

pub mod numeric;
