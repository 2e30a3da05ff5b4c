use image::RgbaImage;
use multiavatar::color::{Color, parse_hex_color};
use multiavatar::config::toml::load_from_file;
use multiavatar::image::raster::{from_pixmap, to_pixmap};
use multiavatar::image::svg::load_vector_icon;
use multiavatar::paths::{config_load_candidates, first_existing};
use multiavatar::{AvatarError, AvatarView, BadgeDrawable, BadgeStyle, Bounds, Paintable, ViewConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum AvatarSource {
    Image(PathBuf),
    Text { text: String, color: Color },
}

#[derive(Debug)]
struct CliArgs {
    debug: bool,
    config: Option<PathBuf>,
    output: PathBuf,
    sources: Vec<AvatarSource>,
    online: Option<bool>,
    with_status: bool,
    badge: Option<PathBuf>,
    show_badge: bool,
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {program} [--config <path>] [--output <path>] [--image <path>]... [--text <TEXT:#rrggbb>]...
                 [--status] [--online|--offline] [--badge <icon.svg>] [--show-badge] [--debug]"
    );
    eprintln!("  up to four --image/--text avatars, tiled in the order given");
}

fn parse_text_source(value: &str) -> Result<AvatarSource, String> {
    let (text, color) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("Invalid --text value '{value}': expected TEXT:#rrggbb"))?;
    let color = parse_hex_color(color).map_err(|err| err.to_string())?;
    Ok(AvatarSource::Text {
        text: text.to_string(),
        color,
    })
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = CliArgs {
        debug: false,
        config: None,
        output: PathBuf::from("avatar.png"),
        sources: Vec::new(),
        online: None,
        with_status: false,
        badge: None,
        show_badge: false,
    };

    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .ok_or_else(|| format!("Missing value for {name}"))
        };
        match arg.as_str() {
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--output" | "-o" => args.output = PathBuf::from(value("--output")?),
            "--image" => args
                .sources
                .push(AvatarSource::Image(PathBuf::from(value("--image")?))),
            "--text" => args.sources.push(parse_text_source(&value("--text")?)?),
            "--badge" => args.badge = Some(PathBuf::from(value("--badge")?)),
            "--status" => args.with_status = true,
            "--online" => args.online = Some(true),
            "--offline" => args.online = Some(false),
            "--show-badge" => args.show_badge = true,
            "--debug" => args.debug = true,
            "--help" | "-h" => {
                print_usage(
                    &env::args()
                        .next()
                        .unwrap_or_else(|| "multiavatar-compose".to_string()),
                );
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }

    if args.sources.is_empty() {
        return Err("At least one --image or --text avatar is required".to_string());
    }
    Ok(args)
}

fn load_config(path: Option<&Path>) -> Result<ViewConfig, AvatarError> {
    if let Some(path) = path {
        return load_from_file(path);
    }
    let candidates = config_load_candidates();
    match first_existing(&candidates) {
        Some(path) => {
            log::info!("using view config '{}'", path.display());
            load_from_file(path)
        }
        None => Ok(ViewConfig::default()),
    }
}

fn load_avatar(path: &Path) -> Result<RgbaImage, AvatarError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| AvatarError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })
}

fn paint_badge(
    snapshot: &RgbaImage,
    icon_path: &Path,
    config: &ViewConfig,
    show: bool,
) -> Result<RgbaImage, AvatarError> {
    let style = BadgeStyle {
        shape: config.badge.shape,
        color: config.badge.color,
        density: config.density(),
    };
    let icon = load_vector_icon(icon_path, config.badge.tint, style.density)?;
    let mut badge = BadgeDrawable::new(&icon, style)?;
    badge.set_show_badge(show);
    badge.resize(Bounds::from_size(snapshot.width(), snapshot.height()));

    let mut pixmap = to_pixmap(snapshot).ok_or_else(|| AvatarError::Allocation {
        label: "badge canvas".to_string(),
        width: snapshot.width(),
        height: snapshot.height(),
    })?;
    badge.paint(&mut pixmap.as_mut());
    Ok(from_pixmap(&pixmap))
}

fn compose(args: &CliArgs) -> Result<(), String> {
    let mut config = load_config(args.config.as_deref()).map_err(|err| err.to_string())?;
    if args.sources.len() > multiavatar::MAX_CAPACITY {
        log::warn!(
            "{} avatars given, only {} fit",
            args.sources.len(),
            multiavatar::MAX_CAPACITY
        );
    }
    config.avatars_count = Some(args.sources.len());
    config.with_status |= args.with_status;
    if let Some(online) = args.online {
        config.online = online;
    }

    let mut view = AvatarView::new(&config).map_err(|err| err.to_string())?;
    for (key, source) in args.sources.iter().take(multiavatar::MAX_CAPACITY).enumerate() {
        match source {
            AvatarSource::Image(path) => {
                let bitmap = load_avatar(path).map_err(|err| err.to_string())?;
                view.add_bitmap_at(key, bitmap);
            }
            AvatarSource::Text { text, color } => {
                view.add_text_bitmap_at(key, text, *color)
                    .map_err(|err| err.to_string())?;
            }
        }
    }
    if view.render_count() == 0 {
        return Err("Avatars were not composed".to_string());
    }

    let mut output = view.snapshot().map_err(|err| err.to_string())?;
    let badge_icon = args.badge.as_ref().or(config.badge.icon.as_ref());
    if let Some(icon_path) = badge_icon {
        let show = args.show_badge || config.badge.show;
        output = paint_badge(&output, icon_path, &config, show).map_err(|err| err.to_string())?;
    }

    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    output
        .save(&args.output)
        .map_err(|err| format!("Failed to save output '{}': {err}", args.output.display()))
}

fn main() {
    let args = match parse_args() {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Error: {err}");
            print_usage(
                &env::args()
                    .next()
                    .unwrap_or_else(|| "multiavatar-compose".to_string()),
            );
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.debug { "debug" } else { "warn" }),
    )
    .init();

    match compose(&args) {
        Ok(()) => println!("Wrote {}", args.output.display()),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
