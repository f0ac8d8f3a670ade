//! Configuration for stations and their tab strips.

use serde::{Deserialize, Serialize};

use crate::error::{DockError, DockResult};

/// Default tab strip height in pixels.
pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 22.0;

/// Default horizontal tab padding in pixels.
pub const DEFAULT_TAB_PADDING: f32 = 8.0;

/// Default tab label font size.
pub const DEFAULT_TAB_FONT_SIZE: f32 = 11.0;

/// Character width factor for estimating tab label width.
pub const DEFAULT_CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Default tab icon size in pixels.
pub const DEFAULT_ICON_SIZE: f32 = 12.0;

/// Default height of a displayer's title decoration.
pub const DEFAULT_TITLE_HEIGHT: f32 = 18.0;

/// Width of the insertion indicator line in pixels.
pub const DEFAULT_INSERTION_LINE_WIDTH: f32 = 2.0;

/// Id of the title version stack stations bind.
pub const STACK_TITLE_ID: &str = "stack";

/// Geometry defaults for stack stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackStyle {
    /// Height of the tab strip.
    pub tab_bar_height: f32,
    /// Padding on each side of a tab label.
    pub tab_padding: f32,
    /// Tab label font size.
    pub tab_font_size: f32,
    /// Average glyph width as a fraction of the font size.
    pub char_width_factor: f32,
    /// Size reserved for a tab icon.
    pub icon_size: f32,
    /// Height reserved for a displayer's title.
    pub title_height: f32,
    /// Width of the insertion indicator.
    pub insertion_line_width: f32,
}

impl Default for StackStyle {
    fn default() -> Self {
        Self {
            tab_bar_height: DEFAULT_TAB_BAR_HEIGHT,
            tab_padding: DEFAULT_TAB_PADDING,
            tab_font_size: DEFAULT_TAB_FONT_SIZE,
            char_width_factor: DEFAULT_CHAR_WIDTH_FACTOR,
            icon_size: DEFAULT_ICON_SIZE,
            title_height: DEFAULT_TITLE_HEIGHT,
            insertion_line_width: DEFAULT_INSERTION_LINE_WIDTH,
        }
    }
}

impl StackStyle {
    /// Set the tab strip height.
    pub fn tab_bar_height(mut self, height: f32) -> Self {
        self.tab_bar_height = height.max(0.0);
        self
    }

    /// Set the tab padding.
    pub fn tab_padding(mut self, padding: f32) -> Self {
        self.tab_padding = padding;
        self
    }

    /// Set the tab font size.
    pub fn tab_font_size(mut self, size: f32) -> Self {
        self.tab_font_size = size;
        self
    }

    /// Set the character width factor.
    pub fn char_width_factor(mut self, factor: f32) -> Self {
        self.char_width_factor = factor;
        self
    }

    /// Set the icon size.
    pub fn icon_size(mut self, size: f32) -> Self {
        self.icon_size = size;
        self
    }

    /// Set the title decoration height.
    pub fn title_height(mut self, height: f32) -> Self {
        self.title_height = height.max(0.0);
        self
    }

    /// Set the insertion indicator width.
    pub fn insertion_line_width(mut self, width: f32) -> Self {
        self.insertion_line_width = width;
        self
    }
}

/// Tree-wide configuration.
///
/// ```
/// use stackdock::DockConfig;
///
/// let config = DockConfig::from_toml_str(
///     r#"
///     focus_on_selection = false
///
///     [stack]
///     tab_bar_height = 30.0
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.stack.tab_bar_height, 30.0);
/// assert!(!config.focus_on_selection);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Geometry used by stations created in this tree.
    pub stack: StackStyle,
    /// Title version id bound by stack stations.
    pub title_id: String,
    /// Whether a change of the selected tab requests focus for the new front panel.
    pub focus_on_selection: bool,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            stack: StackStyle::default(),
            title_id: STACK_TITLE_ID.to_string(),
            focus_on_selection: true,
        }
    }
}

impl DockConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> DockResult<Self> {
        toml::from_str(source).map_err(|e| DockError::Config(e.to_string()))
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> DockResult<String> {
        toml::to_string_pretty(self).map_err(|e| DockError::Config(e.to_string()))
    }

    /// Replace the stack style.
    pub fn with_stack_style(mut self, style: StackStyle) -> Self {
        self.stack = style;
        self
    }
}
