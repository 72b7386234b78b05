//! Compile configuration.

use pgsl_codegen::TranspileConfig;
use pgsl_log::Level;
use pgsl_typecheck::TraceOptions;

/// Options of a [`Session`](crate::Session).
///
/// ```
/// use pgsl::CompileOptions;
///
/// let options = CompileOptions::new().enable_f16(true).colors(false);
/// assert!(options.trace_options().enable_f16);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    enable_f16: bool,
    check_call_arguments: bool,
    colors: bool,
    log_level: Option<Level>,
    binding_group: u32,
}

impl CompileOptions {
    /// Default options: no f16, unchecked call arguments, plain diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Permits `Float16` and emits `enable f16;`.
    #[must_use]
    pub fn enable_f16(mut self, enabled: bool) -> Self {
        self.enable_f16 = enabled;
        self
    }

    /// Checks call arguments against the callee's parameters.
    #[must_use]
    pub fn check_call_arguments(mut self, enabled: bool) -> Self {
        self.check_call_arguments = enabled;
        self
    }

    /// Colours rendered diagnostics with ANSI escapes.
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Overrides the global log level when a session is created.
    #[must_use]
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Bind group of emitted resource variables.
    #[must_use]
    pub fn binding_group(mut self, group: u32) -> Self {
        self.binding_group = group;
        self
    }

    /// Whether rendered diagnostics are coloured.
    #[must_use]
    pub fn uses_colors(&self) -> bool {
        self.colors
    }

    /// Log level override, if any.
    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.log_level
    }

    /// Validation part of the options.
    #[must_use]
    pub fn trace_options(&self) -> TraceOptions {
        TraceOptions {
            enable_f16: self.enable_f16,
            check_call_arguments: self.check_call_arguments,
        }
    }

    /// Emission part of the options.
    #[must_use]
    pub fn transpile_config(&self) -> TranspileConfig {
        TranspileConfig {
            binding_group: self.binding_group,
        }
    }
}
