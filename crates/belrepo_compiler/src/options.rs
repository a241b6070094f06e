//! Compile options and per-call overrides.

/// Options controlling how strictly a document is compiled.
///
/// Values are immutable once built; a call that needs different settings
/// derives a fresh value with [`CompileOptions::merged`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Accept terms without a namespace prefix.
    pub allow_naked_names: bool,
    /// Accept namespace prefixes that were never defined.
    pub allow_undefined_namespaces: bool,
    /// Fail the document on its first warning.
    pub strict: bool,
}

/// Per-call overrides; `None` keeps the base value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileOverrides {
    /// Overrides [`CompileOptions::allow_naked_names`].
    pub allow_naked_names: Option<bool>,
    /// Overrides [`CompileOptions::allow_undefined_namespaces`].
    pub allow_undefined_namespaces: Option<bool>,
    /// Overrides [`CompileOptions::strict`].
    pub strict: Option<bool>,
}

impl CompileOptions {
    /// Returns a new value with every `Some` override applied.
    pub fn merged(&self, overrides: &CompileOverrides) -> CompileOptions {
        CompileOptions {
            allow_naked_names: overrides
                .allow_naked_names
                .unwrap_or(self.allow_naked_names),
            allow_undefined_namespaces: overrides
                .allow_undefined_namespaces
                .unwrap_or(self.allow_undefined_namespaces),
            strict: overrides.strict.unwrap_or(self.strict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_base() {
        let base = CompileOptions {
            allow_naked_names: true,
            ..CompileOptions::default()
        };
        assert_eq!(base.merged(&CompileOverrides::default()), base);
    }

    #[test]
    fn overrides_apply_without_touching_base() {
        let base = CompileOptions::default();
        let merged = base.merged(&CompileOverrides {
            strict: Some(true),
            allow_naked_names: Some(true),
            ..CompileOverrides::default()
        });
        assert!(merged.strict);
        assert!(merged.allow_naked_names);
        assert!(!merged.allow_undefined_namespaces);
        assert!(!base.strict);
    }
}
