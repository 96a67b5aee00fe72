//! Domain layer: the settings record and the rules that keep it valid.
//!
//! Nothing in here performs I/O.  The types are plain data with `serde`
//! derives so the infrastructure layer can store them in whatever format the
//! host expects.
//!
//! # Sub-modules
//!
//! - **`settings`**  – The canonical [`Settings`] record, its defaults and
//!   [`Settings::validate`].
//! - **`overrides`** – The partial record read from disk and the field-by-field
//!   default-merge.
//! - **`toggle`**    – Catalogue of the boolean switches shown on the settings page.
//!
//! [`Settings`]: settings::Settings
//! [`Settings::validate`]: settings::Settings::validate

pub mod overrides;
pub mod settings;
pub mod toggle;
