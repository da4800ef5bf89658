//! Component/system stub generator

use std::path::{Path, PathBuf};

use crate::error::AppError;

const COMPONENT_TEMPLATE: &str = include_str!("../templates/component.rs.tmpl");

/// Substitute every `{{key}}` placeholder in `template`
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{{{key}}}}}"), value)
    })
}

/// `PlayerInput` -> `player_input`
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let starts_upper = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if !starts_upper || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Generator(format!(
            "'{name}' is not a valid kind name (expected PascalCase, e.g. PlayerInput)"
        )));
    }
    Ok(())
}

/// Write `<out_dir>/<snake_name>.rs` holding a component and system stub
/// for kind `name`
///
/// Existing files are never overwritten.
pub fn generate(name: &str, out_dir: &Path) -> Result<PathBuf, AppError> {
    validate_name(name)?;

    let path = out_dir.join(format!("{}.rs", snake_case(name)));
    if path.exists() {
        return Err(AppError::Generator(format!(
            "{} already exists",
            path.display()
        )));
    }

    let source = render(COMPONENT_TEMPLATE, &[("name", name), ("kind", name)]);
    std::fs::create_dir_all(out_dir)?;
    std::fs::write(&path, source)?;
    log::info!("Generated {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_all_placeholders() {
        let text = render("{{name}}System handles {{kind}} ({{name}})", &[
            ("name", "Spin"),
            ("kind", "spin"),
        ]);
        assert_eq!(text, "SpinSystem handles spin (Spin)");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("PlayerInput"), "player_input");
        assert_eq!(snake_case("Hud"), "hud");
    }

    #[test]
    fn test_generate_writes_stub_once() {
        let dir = tempfile::tempdir().unwrap();

        let path = generate("PlayerInput", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("player_input.rs"));

        let source = std::fs::read_to_string(&path).unwrap();
        assert!(source.contains("pub struct PlayerInputComponent"));
        assert!(source.contains("ComponentKind::new(\"PlayerInput\")"));
        assert!(!source.contains("{{"));

        assert!(matches!(
            generate("PlayerInput", dir.path()),
            Err(AppError::Generator(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["", "lower", "Has Space", "Dash-Name"] {
            assert!(generate(name, dir.path()).is_err(), "{name:?} accepted");
        }
    }
}
