//! Runtime theme loader generation.
//!
//! The processor only depends on [`LoaderGenerator`]; [`ThemeLoaderGenerator`]
//! is the default implementation and renders `embed/loader/theme.js`.
//!
//! Given a theme folder
//!
//! ```text
//! my-theme/
//! ├── styles.css
//! └── components/
//!     └── vaadin-button.css
//! ```
//!
//! the generated `my-theme.js` imports both stylesheets, registers
//! `vaadin-button.css` for the `vaadin-button` element and injects
//! `styles.css` into every target passed to `applyTheme(target)`.

use rustc_hash::FxHashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::asset::Glob;
use crate::embed::loader::{LoaderVars, THEME_LOADER_JS};
use crate::error::Result;
use crate::theme::ThemeProperties;

/// Produces the loader script text for one theme.
///
/// Implementations must be pure: the same folder contents, name and
/// properties give the same text.
pub trait LoaderGenerator {
    fn generate(
        &self,
        theme_folder: &Path,
        theme_name: &str,
        properties: &ThemeProperties,
    ) -> Result<String>;
}

impl<F> LoaderGenerator for F
where
    F: Fn(&Path, &str, &ThemeProperties) -> Result<String>,
{
    fn generate(
        &self,
        theme_folder: &Path,
        theme_name: &str,
        properties: &ThemeProperties,
    ) -> Result<String> {
        self(theme_folder, theme_name, properties)
    }
}

const REGISTER_STYLES_IMPORT: &str =
    "import { unsafeCSS, registerStyles } from '@vaadin/vaadin-themable-mixin/register-styles';\n";
const LUMO_STYLES_PACKAGE: &str = "@vaadin/vaadin-lumo-styles";
const COMPONENTS_FOLDER: &str = "components";

/// Default generator for Vaadin-style themes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeLoaderGenerator;

impl LoaderGenerator for ThemeLoaderGenerator {
    fn generate(
        &self,
        theme_folder: &Path,
        theme_name: &str,
        properties: &ThemeProperties,
    ) -> Result<String> {
        let global_files = Glob::new("*.css")?.resolve(theme_folder);
        let component_files =
            Glob::new(&format!("{COMPONENTS_FOLDER}/*.css"))?.resolve(theme_folder);

        let mut used = FxHashSet::default();
        let mut vars = LoaderVars {
            theme_name: escape_js(theme_name),
            ..LoaderVars::default()
        };

        for lumo in properties.lumo_imports() {
            let _ = writeln!(
                vars.imports,
                "import '{LUMO_STYLES_PACKAGE}/{}.js';",
                escape_js(lumo)
            );
        }

        for file in file_names(&global_files) {
            let variable = unique_name(variable_name(&file), &mut used);
            let _ = writeln!(
                vars.imports,
                "import {variable} from './{}';",
                escape_js(&file)
            );
            let _ = writeln!(
                vars.global_css,
                "    injectGlobalCss({variable}.toString(), target);"
            );
        }

        if !component_files.is_empty() {
            vars.imports.push_str(REGISTER_STYLES_IMPORT);
        }
        for file in file_names(&component_files) {
            let variable =
                unique_name(variable_name(&format!("{COMPONENTS_FOLDER}-{file}")), &mut used);
            let tag = file.strip_suffix(".css").unwrap_or(&file);
            let _ = writeln!(
                vars.imports,
                "import {variable} from './{COMPONENTS_FOLDER}/{}';",
                escape_js(&file)
            );
            let _ = writeln!(
                vars.component_css,
                "registerStyles('{}', unsafeCSS({variable}.toString()));",
                escape_js(tag)
            );
        }

        Ok(THEME_LOADER_JS.render(&vars))
    }
}

/// Base names of `files`, keeping their (sorted) order.
fn file_names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .filter_map(|f| f.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect()
}

/// camelCase identifier for a file name: `my-button.css` → `myButtonCss`.
fn variable_name(file_name: &str) -> String {
    let mut out = String::with_capacity(file_name.len());
    let mut upper = false;
    for c in file_name.chars() {
        if c.is_ascii_alphanumeric() {
            if upper && !out.is_empty() {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            upper = false;
        } else {
            upper = true;
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Suffix `name` with a counter until it is unused in this loader.
fn unique_name(name: String, used: &mut FxHashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{name}{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Escape for a single-quoted JS string literal.
fn escape_js(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_variable_name() {
        assert_eq!(variable_name("styles.css"), "stylesCss");
        assert_eq!(variable_name("my-button.css"), "myButtonCss");
        assert_eq!(
            variable_name("components-vaadin-button.css"),
            "componentsVaadinButtonCss"
        );
        assert_eq!(variable_name("1st.css"), "_1stCss");
        assert_eq!(variable_name("--"), "_");
    }

    #[test]
    fn test_unique_name_suffixes_collisions() {
        let mut used = FxHashSet::default();
        assert_eq!(unique_name("aCss".into(), &mut used), "aCss");
        assert_eq!(unique_name("aCss".into(), &mut used), "aCss2");
        assert_eq!(unique_name("aCss".into(), &mut used), "aCss3");
        // An explicit name that looks like a suffixed one still stays unique
        assert_eq!(unique_name("aCss2".into(), &mut used), "aCss22");
    }

    #[test]
    fn test_generate_colliding_file_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("my-theme.css"), "").unwrap();
        fs::write(dir.path().join("my.theme.css"), "").unwrap();
        fs::write(dir.path().join("components-x.css"), "").unwrap();
        fs::create_dir_all(dir.path().join("components")).unwrap();
        fs::write(dir.path().join("components/x.css"), "").unwrap();

        let js = ThemeLoaderGenerator
            .generate(dir.path(), "t", &ThemeProperties::empty())
            .unwrap();

        assert_eq!(js.matches("import myThemeCss from").count(), 1);
        assert_eq!(js.matches("import myThemeCss2 from").count(), 1);
        assert!(js.contains("import componentsXCss from './components-x.css';"));
        assert!(js.contains("import componentsXCss2 from './components/x.css';"));
        assert!(js.contains("registerStyles('x', unsafeCSS(componentsXCss2.toString()));"));
    }

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js("it's"), "it\\'s");
        assert_eq!(escape_js("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_generate_empty_theme() {
        let dir = TempDir::new().unwrap();
        let js = ThemeLoaderGenerator
            .generate(dir.path(), "plain", &ThemeProperties::empty())
            .unwrap();

        assert!(js.contains("export const applyTheme"));
        assert!(js.contains("_vaadintheme_plain_globalCss"));
        assert!(!js.contains("injectGlobalCss(stylesCss"));
        assert!(!js.contains("registerStyles("));
    }

    #[test]
    fn test_generate_global_and_component_css() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("styles.css"), "html {}").unwrap();
        fs::write(dir.path().join("extra.css"), "body {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir_all(dir.path().join("components")).unwrap();
        fs::write(dir.path().join("components/vaadin-button.css"), ":host {}").unwrap();

        let props = ThemeProperties::from_json(
            &dir.path().join("theme.json"),
            r#"{"lumoImports": ["color"]}"#,
        )
        .unwrap();
        let js = ThemeLoaderGenerator
            .generate(dir.path(), "my-theme", &props)
            .unwrap();

        assert!(js.contains("import '@vaadin/vaadin-lumo-styles/color.js';"));
        assert!(js.contains("import extraCss from './extra.css';"));
        assert!(js.contains("import stylesCss from './styles.css';"));
        assert!(js.contains("injectGlobalCss(stylesCss.toString(), target);"));
        assert!(js.contains(
            "import componentsVaadinButtonCss from './components/vaadin-button.css';"
        ));
        assert!(js.contains(
            "registerStyles('vaadin-button', unsafeCSS(componentsVaadinButtonCss.toString()));"
        ));
        assert!(!js.contains("notes"));

        // Sorted order keeps output stable
        let extra = js.find("import extraCss").unwrap();
        let styles = js.find("import stylesCss").unwrap();
        assert!(extra < styles);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.css"), "").unwrap();
        fs::write(dir.path().join("a.css"), "").unwrap();

        let first = ThemeLoaderGenerator
            .generate(dir.path(), "t", &ThemeProperties::empty())
            .unwrap();
        let second = ThemeLoaderGenerator
            .generate(dir.path(), "t", &ThemeProperties::empty())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_closure_generator() {
        let generator = |_: &Path, name: &str, _: &ThemeProperties| -> Result<String> {
            Ok(format!("// {name}"))
        };
        let js = generator
            .generate(Path::new("."), "x", &ThemeProperties::empty())
            .unwrap();
        assert_eq!(js, "// x");
    }
}
