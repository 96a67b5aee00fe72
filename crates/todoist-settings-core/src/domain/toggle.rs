//! Catalogue of the boolean switches on the settings page.
//!
//! The settings page shows one switch per boolean field.  Rather than
//! hard-coding twelve closures, a presenter iterates [`Toggle::ALL`] and binds
//! each switch through [`Toggle::get`] / [`Toggle::set`].

use super::settings::Settings;

/// A boolean field of [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    FadeAnimation,
    AutoRefresh,
    RenderHeading,
    RenderDescription,
    RenderDate,
    RenderDateIcon,
    RenderAppendDate,
    RenderProject,
    RenderProjectIcon,
    RenderLabels,
    RenderLabelsIcon,
    DebugLogging,
}

impl Toggle {
    /// Every toggle, in settings-page order.
    pub const ALL: [Toggle; 12] = [
        Toggle::FadeAnimation,
        Toggle::AutoRefresh,
        Toggle::RenderHeading,
        Toggle::RenderDescription,
        Toggle::RenderDate,
        Toggle::RenderDateIcon,
        Toggle::RenderAppendDate,
        Toggle::RenderProject,
        Toggle::RenderProjectIcon,
        Toggle::RenderLabels,
        Toggle::RenderLabelsIcon,
        Toggle::DebugLogging,
    ];

    /// The camelCase key this toggle is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Toggle::FadeAnimation => "fadeToggle",
            Toggle::AutoRefresh => "autoRefreshToggle",
            Toggle::RenderHeading => "renderHeading",
            Toggle::RenderDescription => "renderDescription",
            Toggle::RenderDate => "renderDate",
            Toggle::RenderDateIcon => "renderDateIcon",
            Toggle::RenderAppendDate => "renderAppendDate",
            Toggle::RenderProject => "renderProject",
            Toggle::RenderProjectIcon => "renderProjectIcon",
            Toggle::RenderLabels => "renderLabels",
            Toggle::RenderLabelsIcon => "renderLabelsIcon",
            Toggle::DebugLogging => "debugLogging",
        }
    }

    pub fn get(self, s: &Settings) -> bool {
        match self {
            Toggle::FadeAnimation => s.fade_toggle,
            Toggle::AutoRefresh => s.auto_refresh_toggle,
            Toggle::RenderHeading => s.render_heading,
            Toggle::RenderDescription => s.render_description,
            Toggle::RenderDate => s.render_date,
            Toggle::RenderDateIcon => s.render_date_icon,
            Toggle::RenderAppendDate => s.render_append_date,
            Toggle::RenderProject => s.render_project,
            Toggle::RenderProjectIcon => s.render_project_icon,
            Toggle::RenderLabels => s.render_labels,
            Toggle::RenderLabelsIcon => s.render_labels_icon,
            Toggle::DebugLogging => s.debug_logging,
        }
    }

    pub fn set(self, settings: &mut Settings, value: bool) {
        *self.field(settings) = value;
    }

    fn field(self, s: &mut Settings) -> &mut bool {
        match self {
            Toggle::FadeAnimation => &mut s.fade_toggle,
            Toggle::AutoRefresh => &mut s.auto_refresh_toggle,
            Toggle::RenderHeading => &mut s.render_heading,
            Toggle::RenderDescription => &mut s.render_description,
            Toggle::RenderDate => &mut s.render_date,
            Toggle::RenderDateIcon => &mut s.render_date_icon,
            Toggle::RenderAppendDate => &mut s.render_append_date,
            Toggle::RenderProject => &mut s.render_project,
            Toggle::RenderProjectIcon => &mut s.render_project_icon,
            Toggle::RenderLabels => &mut s.render_labels,
            Toggle::RenderLabelsIcon => &mut s.render_labels_icon,
            Toggle::DebugLogging => &mut s.debug_logging,
        }
    }
}
