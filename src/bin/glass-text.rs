use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use glass_text::{
    AttrName, CpuRenderer, FrameOpts, GlassConfig, GlassText, ImageSource, ThreadedProber,
    decode_image, markup,
};

#[derive(Parser, Debug)]
#[command(name = "glass-text", version, about = "Frosted-glass text over an image")]
struct Cli {
    /// Log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the component as a PNG.
    Render(RenderArgs),
    /// Print the equivalent `<glass-text>` markup.
    Markup(ComponentArgs),
    /// Print the resolved view tree as JSON.
    Inspect(ComponentArgs),
}

#[derive(Args, Debug)]
struct ComponentArgs {
    /// JSON config; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory relative image paths resolve against (defaults to the config's directory).
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Image path, `file://` or `data:` URI.
    #[arg(long)]
    image_src: Option<String>,

    /// Glass blur in px.
    #[arg(long)]
    blur: Option<String>,

    /// Glass brightness multiplier.
    #[arg(long)]
    brightness: Option<String>,

    /// Glyph anchor x.
    #[arg(long)]
    text_x: Option<String>,

    /// Glyph anchor y.
    #[arg(long)]
    text_y: Option<String>,

    /// Glyph font size.
    #[arg(long)]
    font_size: Option<String>,

    /// Glyph font weight.
    #[arg(long)]
    font_weight: Option<String>,

    /// Glyph font family.
    #[arg(long)]
    font_family: Option<String>,

    /// Image fit mode.
    #[arg(long)]
    object_fit: Option<String>,

    /// Text content.
    #[arg(long)]
    text: Option<String>,

    /// How long to wait for the image probe, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    probe_timeout_ms: u64,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    component: ComponentArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Host box width in px.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Host box height in px, used when no image aspect is reserved.
    #[arg(long)]
    height: Option<u32>,

    /// Extra directory to load fonts from (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Markup(args) => cmd_markup(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

impl ComponentArgs {
    fn flag_config(&self) -> GlassConfig {
        let mut cfg = GlassConfig::default();
        let flags = [
            (AttrName::ImageSrc, &self.image_src),
            (AttrName::Blur, &self.blur),
            (AttrName::Brightness, &self.brightness),
            (AttrName::TextX, &self.text_x),
            (AttrName::TextY, &self.text_y),
            (AttrName::FontSize, &self.font_size),
            (AttrName::FontWeight, &self.font_weight),
            (AttrName::FontFamily, &self.font_family),
            (AttrName::ObjectFit, &self.object_fit),
        ];
        for (name, value) in flags {
            cfg.set(name, value.clone());
        }
        cfg.text = self.text.clone();
        cfg
    }

    fn resolve(&self) -> anyhow::Result<(GlassConfig, PathBuf)> {
        let (base, config_dir) = match &self.config {
            Some(path) => {
                let cfg = GlassConfig::from_path(path)?;
                let dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                (cfg, dir)
            }
            None => (GlassConfig::default(), PathBuf::from(".")),
        };
        let base_dir = self.base_dir.clone().unwrap_or(config_dir);
        Ok((base.merged_with(self.flag_config()), base_dir))
    }

    /// Build, attach and settle a component.
    fn build(&self) -> anyhow::Result<(GlassText, PathBuf)> {
        let (cfg, base_dir) = self.resolve()?;
        let mut component = GlassText::new(ThreadedProber::new(base_dir.clone()));
        cfg.apply_to(&mut component);
        component.attach();
        if !component.settle(Duration::from_millis(self.probe_timeout_ms)) {
            tracing::warn!(
                timeout_ms = self.probe_timeout_ms,
                "image probe did not finish in time"
            );
        }
        Ok((component, base_dir))
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (component, base_dir) = args.component.build()?;
    let view = component.view();

    let image = if view.sharp.src.is_empty() {
        None
    } else {
        let bytes = ImageSource::from_uri(&view.sharp.src)
            .read_bytes(&base_dir)
            .with_context(|| format!("load image '{}'", view.sharp.src))?;
        Some(decode_image(&bytes)?)
    };

    let mut opts = FrameOpts::new(args.width);
    if let Some(h) = args.height {
        opts = opts.with_height(h);
    }

    let font_dirs: Vec<&Path> = args.font_dirs.iter().map(PathBuf::as_path).collect();
    let mut renderer = CpuRenderer::with_font_dirs(&font_dirs);
    if !renderer.has_fonts() {
        tracing::warn!("no fonts available; the glass glyph will be empty");
    }
    let frame = renderer.render(view, image.as_ref(), &opts)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_markup(args: ComponentArgs) -> anyhow::Result<()> {
    let (cfg, _) = args.resolve()?;
    let mut component = GlassText::new(glass_text::ManualProber::new());
    cfg.apply_to(&mut component);
    println!("{}", markup::for_component(&component));
    Ok(())
}

fn cmd_inspect(args: ComponentArgs) -> anyhow::Result<()> {
    let (component, _) = args.build()?;
    let out = serde_json::json!({
        "view": component.view(),
        "stats": component.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
