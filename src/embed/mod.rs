//! Embedded script templates.
//!
//! # Usage
//!
//! ```ignore
//! use embed::loader::{THEME_LOADER_JS, LoaderVars};
//!
//! let js = THEME_LOADER_JS.render(&vars);
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod loader {
    use super::{Template, TemplateVars};
    use regex::{Captures, Regex};
    use std::sync::LazyLock;

    static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"__[A-Z]+(?:_[A-Z]+)*__").unwrap()
    });

    /// Variables for theme.js template.
    ///
    /// Every block is inserted verbatim and must end with a newline when
    /// non-empty.
    #[derive(Debug, Clone, Default)]
    pub struct LoaderVars {
        /// Theme name, already escaped for a single-quoted JS string.
        pub theme_name: String,
        /// `import` statements.
        pub imports: String,
        /// `registerStyles(...)` calls run at module load.
        pub component_css: String,
        /// `injectGlobalCss(...)` calls run inside `applyTheme`.
        pub global_css: String,
    }

    impl LoaderVars {
        /// Key under `window.Vaadin` tracking targets already styled.
        pub fn global_css_flag(&self) -> String {
            format!("_vaadintheme_{}_globalCss", self.theme_name)
        }
    }

    impl TemplateVars for LoaderVars {
        /// Single pass: substituted values are never rescanned.
        fn apply(&self, content: &str) -> String {
            let flag = self.global_css_flag();
            PLACEHOLDER
                .replace_all(content, |caps: &Captures<'_>| match &caps[0] {
                    "__GLOBAL_CSS_FLAG__" => flag.clone(),
                    "__THEME_NAME__" => self.theme_name.clone(),
                    "__IMPORTS__" => self.imports.clone(),
                    "__COMPONENT_CSS__" => self.component_css.clone(),
                    "__GLOBAL_CSS__" => self.global_css.clone(),
                    other => other.to_string(),
                })
                .into_owned()
        }
    }

    /// Runtime loader written next to each theme.
    pub const THEME_LOADER_JS: Template<LoaderVars> =
        Template::new(include_str!("loader/theme.js"));
}

#[cfg(test)]
mod tests {
    use super::loader::{LoaderVars, THEME_LOADER_JS};

    #[test]
    fn test_loader_template_has_placeholders() {
        let content = THEME_LOADER_JS.content();
        for placeholder in [
            "__THEME_NAME__",
            "__IMPORTS__",
            "__COMPONENT_CSS__",
            "__GLOBAL_CSS__",
            "__GLOBAL_CSS_FLAG__",
        ] {
            assert!(content.contains(placeholder), "missing {placeholder}");
        }
    }

    #[test]
    fn test_render_replaces_everything() {
        let vars = LoaderVars {
            theme_name: "dark".into(),
            ..Default::default()
        };
        let js = THEME_LOADER_JS.render(&vars);

        assert!(!js.contains("__"));
        assert!(js.contains("window.Vaadin['_vaadintheme_dark_globalCss']"));
        assert!(js.contains("Theme loader for 'dark'"));
    }

    #[test]
    fn test_render_does_not_expand_placeholders_in_values() {
        let vars = LoaderVars {
            theme_name: "__IMPORTS__".into(),
            imports: "import x from './__GLOBAL_CSS__.css';\n".into(),
            global_css: "    injectGlobalCss(x.toString(), target);\n".into(),
            ..Default::default()
        };
        let js = THEME_LOADER_JS.render(&vars);

        assert!(js.contains("import x from './__GLOBAL_CSS__.css';"));
        assert!(js.contains("Theme loader for '__IMPORTS__'"));
        assert_eq!(js.matches("injectGlobalCss(x.toString(), target);").count(), 1);
    }
}
