/// Unit used by `sin`, `cos` and `tan` for their argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AngleMode {
    /// `sin` takes degrees while `cos` and `tan` take radians.
    /// Kept as the default so existing sessions keep their results.
    #[default]
    Legacy,
    Degrees,
    Radians,
}

impl AngleMode {
    /// Converts a `sin` argument to radians.
    pub fn sine_argument(self, value: f64) -> f64 {
        match self {
            AngleMode::Legacy | AngleMode::Degrees => value.to_radians(),
            AngleMode::Radians => value,
        }
    }

    /// Converts a `cos`/`tan` argument to radians.
    pub fn cosine_argument(self, value: f64) -> f64 {
        match self {
            AngleMode::Degrees => value.to_radians(),
            AngleMode::Legacy | AngleMode::Radians => value,
        }
    }
}

pub const DEFAULT_MAX_INPUT_LEN: usize = 1024;

/// Session settings, fixed when the [`Context`](crate::Context) is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub angle_mode: AngleMode,
    /// Register an unknown name written as a call (`foo(...)`) as a one-argument
    /// function instead of reading it as a variable.
    pub auto_register_functions: bool,
    /// Longest accepted input, in characters.
    pub max_input_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::default(),
            auto_register_functions: false,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    pub fn with_auto_register_functions(mut self, enabled: bool) -> Self {
        self.auto_register_functions = enabled;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.angle_mode, AngleMode::Legacy);
        assert!(!config.auto_register_functions);
        assert_eq!(config.max_input_len, 1024);
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_angle_mode(AngleMode::Radians)
            .with_auto_register_functions(true)
            .with_max_input_len(16);
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert!(config.auto_register_functions);
        assert_eq!(config.max_input_len, 16);
    }

    #[test]
    fn test_legacy_only_converts_sine() {
        let mode = AngleMode::Legacy;
        assert!((mode.sine_argument(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(mode.cosine_argument(180.0), 180.0);
    }

    #[test]
    fn test_uniform_modes() {
        assert!((AngleMode::Degrees.cosine_argument(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(AngleMode::Radians.sine_argument(1.5), 1.5);
        assert_eq!(AngleMode::Radians.cosine_argument(1.5), 1.5);
    }
}
