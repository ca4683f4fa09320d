/*!
 * Colored rendering of a tagged script, one span per line.
 */

use crate::screenplay::labels::StructuralLabel;
use crate::screenplay::model::Scene;

/// Output flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Markdown,
    Html,
}

impl RenderFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

fn color(label: StructuralLabel) -> &'static str {
    match label {
        StructuralLabel::EmptyLine => "rosybrown",
        StructuralLabel::SceneBoundary | StructuralLabel::SceneBoundaryAndDescription => "dodgerblue",
        StructuralLabel::SceneDescription => "hotpink",
        StructuralLabel::Character => "gold",
        StructuralLabel::Dialogue => "peru",
        StructuralLabel::Metadata => "olivedrab",
        StructuralLabel::Unknown => "snow",
    }
}

/// One line as a colored span, prefixed by its label code
pub fn render_line(line: &str, label: StructuralLabel) -> String {
    let text = format!("{}    {}", label.code(), line)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace(' ', "&nbsp;");
    format!("<span style=\"color:{}\">{}</span><br>\n", color(label), text)
}

/// Render every scene in the given flavor
pub fn render(scenes: &[Scene], format: RenderFormat) -> String {
    let mut out = String::new();
    for scene in scenes {
        for (line, label) in scene.lines.iter().zip(&scene.tags) {
            out.push_str(&render_line(line, *label));
        }
        if format == RenderFormat::Markdown {
            out.push_str("\n---\n\n");
        }
    }
    out
}

pub fn markdown(scenes: &[Scene]) -> String {
    render(scenes, RenderFormat::Markdown)
}

pub fn html(scenes: &[Scene]) -> String {
    render(scenes, RenderFormat::Html)
}
