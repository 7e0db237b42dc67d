use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tera::{Context, Tera};

use crate::config::Config;
use crate::error::GenerateError;

/// Wraps every page.
pub const LAYOUT: &str = "layout.html";

/// A page template and the file it is written to.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub template: &'static str,
    pub output: &'static str
}

/// Rendered in this order on every build.
pub const PAGES: [Page; 2] = [
    Page {
        template: "main.html",
        output: "index.html"
    },
    Page {
        template: "404.html",
        output: "404.html"
    }
];

/// Builds the site rooted at `dir`: `config.yml`, `templates/` and an
/// existing `build/` directory for the output.
pub fn run_build(dir: &Path) -> Result<(), GenerateError> {
    generate(
        &dir.join("config.yml"),
        &dir.join("templates"),
        &dir.join("build")
    )
}

/// Renders every entry of [`PAGES`] through [`LAYOUT`] and writes it to
/// `output_dir`. Stops at the first failure; pages already written are
/// left in place.
pub fn generate(
    document: &Path,
    templates_dir: &Path,
    output_dir: &Path
) -> Result<(), GenerateError> {
    info!("Reading config");
    let config = Config::load(document)?;
    debug!("{:?}", &config);

    info!("Initializing Tera");
    let tera = load_templates(templates_dir)?;

    for page in &PAGES {
        info!("Rendering {}", page.template);
        let html = render_page(&tera, &config, page)?;
        write_page(&output_dir.join(page.output), &html)?;
    }

    info!("Build complete");
    Ok(())
}

fn load_templates(dir: &Path) -> Result<Tera, GenerateError> {
    let init_err = |source: tera::Error| GenerateError::TemplateInit {
        dir: dir.to_path_buf(),
        source
    };

    if !dir.is_dir() {
        return Err(init_err(tera::Error::msg("not a directory")));
    }

    // not a glob: the site root may contain `[`, `*` or `?`
    let mut files = Vec::new();
    collect_templates(dir, dir, &mut files).map_err(init_err)?;
    files.sort();

    let mut tera = Tera::default();
    tera.add_template_files(files.iter().map(|(path, name)| (path, Some(name))))
        .map_err(init_err)?;
    debug!(
        "Loaded templates: {:?}",
        tera.get_template_names().collect::<Vec<_>>()
    );
    Ok(tera)
}

/// Every `*.html` below `base`, named by its `/`-separated relative path.
fn collect_templates(
    dir: &Path,
    base: &Path,
    files: &mut Vec<(PathBuf, String)>
) -> Result<(), tera::Error> {
    let read_err = |e: io::Error| tera::Error::chain(format!("cannot read {}", dir.display()), e);

    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_dir() {
            collect_templates(&path, base, files)?;
        } else if path.extension().and_then(|s| s.to_str()) == Some("html") {
            let name = path
                .strip_prefix(base)
                .map_err(|e| {
                    tera::Error::chain(format!("{} is outside {}", path.display(), base.display()), e)
                })?
                .to_str()
                .ok_or_else(|| {
                    tera::Error::msg(format!("template path is not UTF-8: {}", path.display()))
                })?
                .replace('\\', "/");
            files.push((path, name));
        }
    }
    Ok(())
}

/// The page body sees the config as its context. The layout additionally
/// gets the rendered body as `content` and the output file name as `page`.
fn render_page(tera: &Tera, config: &Config, page: &Page) -> Result<String, GenerateError> {
    let render_err = |source: tera::Error| GenerateError::Render {
        template: page.template.to_owned(),
        source
    };

    let mut context = Context::from_serialize(config).map_err(render_err)?;
    let body = tera.render(page.template, &context).map_err(render_err)?;

    context.insert("content", &body);
    context.insert("page", page.output);
    tera.render(LAYOUT, &context).map_err(render_err)
}

fn write_page(path: &Path, html: &str) -> Result<(), GenerateError> {
    debug!("Writing {} ({} bytes)", path.display(), html.len());

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options
        .open(path)
        .and_then(|mut file| file.write_all(html.as_bytes()))
        .map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source
        })
}
