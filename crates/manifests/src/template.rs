//! Strict template rendering.
//!
//! Every template is rendered with [`minijinja`] in strict undefined mode:
//! a placeholder with no corresponding value fails the render instead of
//! leaking `{{ ... }}` syntax into a manifest.

use clusterforge_asset::BoxedError;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// Render `source` with `data`, failing on any undefined placeholder.
pub fn render(name: &str, source: &[u8], data: &impl Serialize) -> Result<Vec<u8>, BoxedError> {
    let source = std::str::from_utf8(source)
        .map_err(|err| format!("template {name} is not valid UTF-8: {err}"))?;
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(name, source)?;
    let rendered = env.get_template(name)?.render(data)?;
    Ok(rendered.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Data {
        image: String,
    }

    #[test]
    fn substitutes_every_placeholder() {
        let out = render(
            "t",
            b"image: {{ image }}",
            &Data {
                image: "quay.io/example/operator:v1".to_string(),
            },
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "image: quay.io/example/operator:v1");
        assert!(!out.contains("{{"));
    }

    #[test]
    fn missing_value_fails_the_render() {
        let err = render(
            "t",
            b"image: {{ image }}\ntag: {{ tag }}",
            &Data {
                image: "x".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("undefined"));
    }
}
