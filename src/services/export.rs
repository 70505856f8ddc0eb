use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use comrak::{Options, markdown_to_html};
use tracing::info;

use super::{DocumentRenderer, RenderError, RenderOptions};

const EXPORT_FILE_NAME: &str = "resume.html";

/// Exports a print-ready HTML page.
///
/// Page size and margins are carried as a CSS `@page` rule so the browser's
/// print dialog produces the final PDF.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    out_dir: PathBuf,
}

impl HtmlRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(EXPORT_FILE_NAME)
    }

    fn write_error(path: &Path, err: &std::io::Error) -> RenderError {
        RenderError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render_to_file(
        &self,
        markdown: &str,
        options: &RenderOptions,
    ) -> Result<PathBuf, RenderError> {
        if markdown.trim().is_empty() {
            return Err(RenderError::EmptyDocument);
        }
        let page = render_page(markdown, options);
        let path = self.output_path();
        fs::create_dir_all(&self.out_dir).map_err(|err| Self::write_error(&self.out_dir, &err))?;
        fs::write(&path, page).map_err(|err| Self::write_error(&path, &err))?;
        info!(path = %path.display(), "document exported");
        Ok(path)
    }
}

/// Wrap rendered markdown in a standalone HTML page.
pub fn render_page(markdown: &str, options: &RenderOptions) -> String {
    let mut comrak_options = Options::default();
    crate::preview::apply_extensions(&mut comrak_options);
    // Contact header relies on raw `<div align="center">` blocks.
    comrak_options.render.unsafe_ = true;
    let body = markdown_to_html(markdown, &comrak_options);

    let [vertical, horizontal] = options.margins;
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>Resume</title>\n");
    let _ = writeln!(
        page,
        "<meta name=\"image-quality\" content=\"{}\">",
        options.image_quality
    );
    let _ = writeln!(
        page,
        "<style>\n@page {{ size: {} portrait; margin: {vertical}mm {horizontal}mm; }}\n\
         body {{ font-family: sans-serif; line-height: 1.4; }}\n\
         img {{ image-rendering: auto; }}\n</style>",
        options.page_format.css_size()
    );
    page.push_str("</head>\n<body>\n");
    page.push_str(&body);
    page.push_str("</body>\n</html>\n");
    page
}
