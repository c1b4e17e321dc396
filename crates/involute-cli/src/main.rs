use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, ValueHint};
use glam::dvec2;
use involute::draw::CurveSampling;
use involute::{Color, GearParameters, Length, Palette, ProfileStyle, RenderOptions, View};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render an involute spur gear profile to PNG")]
struct Cli {
    #[command(flatten)]
    gear: GearArgs,

    /// Destination PNG file
    #[arg(short, long, default_value = "gear.png", value_hint = ValueHint::FilePath)]
    output: Utf8PathBuf,

    #[command(flatten)]
    image: ImageArgs,

    #[command(flatten)]
    colors: ColorArgs,
}

#[derive(Args, Debug)]
struct GearArgs {
    /// Circular pitch: pitch-circle arc length per tooth, in user units
    #[arg(long, default_value_t = 2.0)]
    pitch: f64,

    /// Number of teeth (at least 3)
    #[arg(long, default_value_t = 25)]
    teeth: u32,

    /// Pressure angle in degrees
    #[arg(long, default_value_t = 20.0)]
    pressure_angle: f64,

    /// Radial clearance subtracted from the tooth tips
    #[arg(long, default_value_t = 0.0)]
    clearance: f64,
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Image width in pixels
    #[arg(long, default_value_t = 900)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 900)]
    height: u32,

    /// Show a fixed window of this half-size instead of fitting the gear
    #[arg(long)]
    zoom: Option<f64>,

    /// Window center, x (only with --zoom)
    #[arg(long, default_value_t = 0.0, requires = "zoom")]
    center_x: f64,

    /// Window center, y (only with --zoom)
    #[arg(long, default_value_t = 0.0, requires = "zoom")]
    center_y: f64,

    /// Room left around the gear when fitting (1.0 = edge to edge)
    #[arg(long, default_value_t = 1.1, conflicts_with = "zoom")]
    margin: f64,

    /// Polyline steps per involute flank
    #[arg(long, default_value_t = 32)]
    steps: usize,

    /// Refine flanks until no chord is longer than this (overrides --steps)
    #[arg(long, value_name = "MAX_SEGMENT")]
    adaptive: Option<f64>,

    /// Multiplier for every stroke width
    #[arg(long, default_value_t = 1.0)]
    stroke_scale: f64,

    /// Axis tick spacing in user units (0 for none)
    #[arg(long, default_value_t = 1.0)]
    ticks: f64,

    /// Leave out the coordinate axes
    #[arg(long = "no-axes", action = ArgAction::SetFalse, default_value_t = true)]
    axes: bool,

    /// Leave out the pitch, root, base and outside circles
    #[arg(long = "no-reference-circles", action = ArgAction::SetFalse, default_value_t = true)]
    reference_circles: bool,

    /// Draw rays to where each flank crosses the outside, pitch and root circles
    #[arg(long)]
    construction_lines: bool,
}

// colors accept `#rrggbb`, `#rrggbbaa` or a name
#[derive(Args, Debug)]
struct ColorArgs {
    #[arg(long)]
    background: Option<Color>,
    #[arg(long)]
    color_pitch: Option<Color>,
    #[arg(long)]
    color_outside: Option<Color>,
    #[arg(long)]
    color_base: Option<Color>,
    #[arg(long)]
    color_root: Option<Color>,
    #[arg(long)]
    color_flank: Option<Color>,
    #[arg(long)]
    color_tip: Option<Color>,
    #[arg(long)]
    color_root_arc: Option<Color>,
    #[arg(long)]
    color_radial: Option<Color>,
}

impl GearArgs {
    fn parameters(&self) -> GearParameters {
        GearParameters::new(self.pitch, self.teeth, self.pressure_angle, self.clearance)
    }
}

impl ColorArgs {
    fn palette(&self) -> Palette {
        let d = Palette::default();
        Palette {
            pitch: self.color_pitch.unwrap_or(d.pitch),
            outside: self.color_outside.unwrap_or(d.outside),
            base: self.color_base.unwrap_or(d.base),
            root: self.color_root.unwrap_or(d.root),
            flank: self.color_flank.unwrap_or(d.flank),
            tip: self.color_tip.unwrap_or(d.tip),
            root_arc: self.color_root_arc.unwrap_or(d.root_arc),
            radial: self.color_radial.unwrap_or(d.radial),
        }
    }
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        let image = &self.image;
        let defaults = RenderOptions::default();

        let view = match image.zoom {
            Some(radius) => View::Window {
                center: dvec2(image.center_x, image.center_y),
                radius: Length(radius),
            },
            None => View::Fit {
                margin: image.margin,
            },
        };
        let sampling = match image.adaptive {
            Some(max_segment) => CurveSampling::Adaptive {
                max_segment: Length(max_segment),
            },
            None => CurveSampling::Uniform { steps: image.steps },
        };

        RenderOptions {
            width: image.width,
            height: image.height,
            view,
            background: self.colors.background.unwrap_or(defaults.background),
            axes: image.axes,
            axis_increment: (image.ticks > 0.0).then_some(Length(image.ticks)),
            profile: ProfileStyle {
                palette: self.colors.palette(),
                sampling,
                stroke_scale: image.stroke_scale,
                reference_circles: image.reference_circles,
                construction_lines: image.construction_lines,
            },
        }
    }
}

fn main() -> miette::Result<()> {
    // logs go to stderr, controlled by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = cli.gear.parameters();
    let options = cli.render_options();

    involute::render_to_file(&params, &options, &cli.output)?;
    info!(path = %cli.output, width = options.width, height = options.height, "wrote gear");
    Ok(())
}
