/// Format versions and strictness switches used while compiling documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    /// `format_version` of behavior-pack entity documents.
    pub behavior_format_version: String,
    /// `format_version` of resource-pack client entity documents.
    pub resource_format_version: String,
    /// `format_version` of item documents.
    pub item_format_version: String,
    /// `format_version` of animation controller documents.
    pub animation_controller_format_version: String,
    /// `format_version` of animation documents.
    pub animation_format_version: String,
    /// Reject re-declared components, events and groups instead of overwriting.
    pub strict_declarations: bool,
    /// Reject behavior animation references the graphics cannot resolve.
    pub strict_graphics_references: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            behavior_format_version: "1.16.0".to_string(),
            resource_format_version: "1.10.0".to_string(),
            item_format_version: "1.16.100".to_string(),
            animation_controller_format_version: "1.10.0".to_string(),
            animation_format_version: "1.8.0".to_string(),
            strict_declarations: false,
            strict_graphics_references: false,
        }
    }
}

impl CompileConfig {
    /// Set the behavior-pack entity format version.
    pub fn with_behavior_format_version(mut self, version: impl Into<String>) -> Self {
        self.behavior_format_version = version.into();
        self
    }

    /// Set the resource-pack client entity format version.
    pub fn with_resource_format_version(mut self, version: impl Into<String>) -> Self {
        self.resource_format_version = version.into();
        self
    }

    /// Set the item format version.
    pub fn with_item_format_version(mut self, version: impl Into<String>) -> Self {
        self.item_format_version = version.into();
        self
    }

    /// Set the animation controller format version.
    pub fn with_animation_controller_format_version(mut self, version: impl Into<String>) -> Self {
        self.animation_controller_format_version = version.into();
        self
    }

    /// Set the animation format version.
    pub fn with_animation_format_version(mut self, version: impl Into<String>) -> Self {
        self.animation_format_version = version.into();
        self
    }

    /// Turn duplicate-declaration checking on or off.
    pub fn with_strict_declarations(mut self, strict: bool) -> Self {
        self.strict_declarations = strict;
        self
    }

    /// Turn animation-reference checking on or off.
    pub fn with_strict_graphics_references(mut self, strict: bool) -> Self {
        self.strict_graphics_references = strict;
        self
    }

    /// Both strict switches at once.
    pub fn strict() -> Self {
        Self::default()
            .with_strict_declarations(true)
            .with_strict_graphics_references(true)
    }
}
