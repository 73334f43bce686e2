//! Knobs for one inference pass

/// Settings for [`infer_types_in`](super::infer_types_in)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Length of a `character` declaration with no `len=` selector
    pub default_character_length: u64,
    /// Report references that the resolver cannot find
    pub report_unresolved_designators: bool,
    /// Report constructs the checker skips, as notes
    pub report_unsupported_constructs: bool,
    /// Stay quiet about expressions whose operands are already [unknown]
    ///
    /// [unknown]: crate::ty::Type::Unknown
    pub suppress_cascading_diagnostics: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            default_character_length: 1,
            report_unresolved_designators: false,
            report_unsupported_constructs: false,
            suppress_cascading_diagnostics: true,
        }
    }
}

impl InferenceOptions {
    /// Set [`Self::default_character_length`]
    #[must_use]
    pub const fn with_default_character_length(mut self, length: u64) -> Self {
        self.default_character_length = length;
        self
    }

    /// Set [`Self::report_unresolved_designators`]
    #[must_use]
    pub const fn with_unresolved_designators_reported(mut self, report: bool) -> Self {
        self.report_unresolved_designators = report;
        self
    }

    /// Set [`Self::report_unsupported_constructs`]
    #[must_use]
    pub const fn with_unsupported_constructs_reported(mut self, report: bool) -> Self {
        self.report_unsupported_constructs = report;
        self
    }

    /// Set [`Self::suppress_cascading_diagnostics`]
    #[must_use]
    pub const fn with_cascading_diagnostics_suppressed(mut self, suppress: bool) -> Self {
        self.suppress_cascading_diagnostics = suppress;
        self
    }
}
