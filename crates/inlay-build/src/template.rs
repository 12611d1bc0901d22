//! Inlining the optimized script into the HTML template.

use std::path::Path;

use crate::builder::BuildError;

/// External script reference that gets replaced by the inline script.
pub const SCRIPT_MARKER: &str = r#"<script src="./main.js"></script>"#;

/// Outcome of injecting a script into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// Every marker was replaced with the inline script.
    Substituted {
        /// Resulting HTML
        html: String,
        /// Number of markers replaced (at least one)
        replaced: usize,
    },

    /// The template contains no marker; nothing was changed.
    MarkerNotFound,
}

impl Injection {
    /// Take the HTML, treating a missing marker as a build error for `template_path`.
    pub fn into_html(self, template_path: &Path) -> Result<String, BuildError> {
        match self {
            Injection::Substituted { html, .. } => Ok(html),
            Injection::MarkerNotFound => Err(BuildError::MarkerNotFound {
                path: template_path.display().to_string(),
                marker: SCRIPT_MARKER.to_string(),
            }),
        }
    }
}

/// Replace the external script marker in `template` with `<script>{script}</script>`.
pub fn inject(template: &str, script: &str) -> Injection {
    let replaced = template.matches(SCRIPT_MARKER).count();
    if replaced == 0 {
        return Injection::MarkerNotFound;
    }

    let inline = format!("<script>{}</script>", script);
    Injection::Substituted {
        html: template.replace(SCRIPT_MARKER, &inline),
        replaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inlines_script() {
        let result = inject(r#"<html><script src="./main.js"></script></html>"#, "x=1;");

        assert_eq!(
            result,
            Injection::Substituted {
                html: "<html><script>x=1;</script></html>".to_string(),
                replaced: 1,
            }
        );
    }

    #[test]
    fn leaves_no_marker_and_one_inline_block() {
        let template = r#"<!doctype html>
<html>
<head><title>Game</title></head>
<body>
<canvas id="c"></canvas>
<script src="./main.js"></script>
</body>
</html>"#;

        let html = inject(template, "let a=document.getElementById('c');")
            .into_html(Path::new("index.html"))
            .unwrap();

        assert!(!html.contains(SCRIPT_MARKER));
        assert_eq!(html.matches("<script>").count(), 1);
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("<script>let a=document.getElementById('c');</script>"));
        assert!(html.starts_with("<!doctype html>"));
    }

    #[test]
    fn missing_marker_is_reported() {
        let result = inject(r#"<html><script src="./app.js"></script></html>"#, "x=1;");
        assert_eq!(result, Injection::MarkerNotFound);

        let err = result.into_html(Path::new("site/index.html")).unwrap_err();
        assert!(matches!(err, BuildError::MarkerNotFound { ref path, .. } if path == "site/index.html"));
    }

    #[test]
    fn counts_every_marker() {
        let template = format!("{0}<hr>{0}", SCRIPT_MARKER);

        match inject(&template, "y") {
            Injection::Substituted { html, replaced } => {
                assert_eq!(replaced, 2);
                assert_eq!(html, "<script>y</script><hr><script>y</script>");
            }
            Injection::MarkerNotFound => panic!("marker should have been found"),
        }
    }

    #[test]
    fn empty_script_still_substitutes() {
        let result = inject(SCRIPT_MARKER, "");

        assert_eq!(
            result,
            Injection::Substituted {
                html: "<script></script>".to_string(),
                replaced: 1,
            }
        );
    }
}
