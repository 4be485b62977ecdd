//! Form configuration types.

/// Per-form configuration.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Name used to tag log output for this form.
    pub name: String,

    /// Initial value of the loading flag.
    pub loading: bool,

    /// Fields that start out touched, e.g. when editing a saved record
    /// whose errors should be visible right away.
    pub touched: Vec<String>,

    /// If true, writing a changed value marks the field as touched.
    pub touch_on_change: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name: "form".to_string(),
            loading: false,
            touched: Vec::new(),
            touch_on_change: true,
        }
    }
}

impl FormConfig {
    /// Create a new config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Start the form in the loading state.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the initially touched fields.
    pub fn touched<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.touched = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether value changes mark fields as touched.
    pub fn touch_on_change(mut self, enabled: bool) -> Self {
        self.touch_on_change = enabled;
        self
    }
}
