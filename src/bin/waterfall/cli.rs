// The Cli gathers the survey files and builds the waterfall Config:
// an optional JSON Config, refined by command line flags.
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use std::{fs::read_to_string, path::PathBuf, str::FromStr};
use thiserror::Error;

use sonar_waterfall::prelude::{
    Config, Error as WaterfallError, IntensityMode, Palette, Quantity,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read configuration: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Waterfall(#[from] WaterfallError),
}

pub struct Cli {
    matches: ArgMatches,
}

impl Cli {
    pub fn new() -> Self {
        let cmd = Command::new("waterfall")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Creates isometric waterfall images from Kongsberg .all surveys")
            .arg_required_else_help(true)
            .color(ColorChoice::Always)
            .arg(
                Arg::new("input")
                    .short('i')
                    .long("input")
                    .action(ArgAction::Append)
                    .num_args(1..)
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Survey file(s) to process, like -i *.all"),
            )
            .arg(
                Arg::new("cfg")
                    .short('c')
                    .long("cfg")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Load JSON Config (Optional). Flags take precedence."),
            )
            .arg(
                Arg::new("zoom")
                    .short('z')
                    .long("zoom")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(f64))
                    .help("Zoom scale factor, -z 2 doubles the native resolution. 0: automatic"),
            )
            .arg(
                Arg::new("annotate")
                    .short('a')
                    .long("annotate")
                    .action(ArgAction::SetTrue)
                    .help("Annotate the waterfall with timestamps and a metadata legend"),
            )
            .arg(
                Arg::new("rotate")
                    .short('r')
                    .long("rotate")
                    .action(ArgAction::SetTrue)
                    .help("Rotate the waterfall so it reads from left to right"),
            )
            .arg(
                Arg::new("palette")
                    .short('p')
                    .long("palette")
                    .action(ArgAction::Set)
                    .conflicts_with("gray")
                    .help("Palette: gray or color"),
            )
            .arg(
                Arg::new("gray")
                    .long("gray")
                    .action(ArgAction::SetTrue)
                    .help("Shortcut for --palette gray"),
            )
            .arg(
                Arg::new("quantity")
                    .short('q')
                    .long("quantity")
                    .action(ArgAction::Set)
                    .help("Stacked quantity: backscatter or depth"),
            )
            .arg(
                Arg::new("mode")
                    .short('m')
                    .long("mode")
                    .action(ArgAction::Set)
                    .conflicts_with("log")
                    .help("Intensity mapping: linear or logarithmic"),
            )
            .arg(
                Arg::new("log")
                    .long("log")
                    .action(ArgAction::SetTrue)
                    .help("Shortcut for --mode logarithmic"),
            )
            .arg(
                Arg::new("clip")
                    .long("clip")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(f64))
                    .help("Percentage of extreme samples excluded from the intensity range"),
            )
            .arg(
                Arg::new("no-invert")
                    .long("no-invert")
                    .action(ArgAction::SetTrue)
                    .help("Strong returns are rendered bright instead of dark"),
            );
        Self {
            matches: cmd.get_matches(),
        }
    }

    /// Survey files, in command line order
    pub fn inputs(&self) -> Vec<PathBuf> {
        self.matches
            .get_many::<PathBuf>("input")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default()
    }

    /// Builds the [Config] to deploy.
    pub fn config(&self) -> Result<Config, CliError> {
        let mut cfg = match self.matches.get_one::<String>("cfg") {
            Some(path) => {
                let content = read_to_string(path)?;
                serde_json::from_str::<Config>(&content)?
            },
            None => Config::default(),
        };

        if let Some(zoom) = self.matches.get_one::<f64>("zoom") {
            cfg = cfg.with_zoom(*zoom);
        }
        if self.matches.get_flag("annotate") {
            cfg = cfg.with_annotation(true);
        }
        if self.matches.get_flag("rotate") {
            cfg = cfg.with_rotation(true);
        }

        if self.matches.get_flag("gray") {
            cfg = cfg.with_palette(Palette::Gray);
        } else if let Some(palette) = self.matches.get_one::<String>("palette") {
            cfg = cfg.with_palette(Palette::from_str(palette)?);
        }

        if let Some(quantity) = self.matches.get_one::<String>("quantity") {
            cfg = cfg.with_quantity(Quantity::from_str(quantity)?);
        }

        let mut mapping = cfg.mapping;
        if self.matches.get_flag("log") {
            mapping = mapping.with_mode(IntensityMode::Logarithmic);
        } else if let Some(mode) = self.matches.get_one::<String>("mode") {
            mapping = mapping.with_mode(IntensityMode::from_str(mode)?);
        }
        if let Some(clip) = self.matches.get_one::<f64>("clip") {
            mapping = mapping.with_clip_percent(*clip);
        }
        if self.matches.get_flag("no-invert") {
            mapping = mapping.with_invert(false);
        }

        Ok(cfg.with_mapping(mapping))
    }
}
