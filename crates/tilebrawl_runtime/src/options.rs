//! Command line options

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq, Parser)]
#[command(name = "tilebrawl", version, about = "Runs the arcade scene without a window")]
pub struct Options {
    /// JSON settings file; defaults apply when absent
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory relative asset paths resolve against
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Frames to run, overriding `simulation.frames`
    #[arg(long)]
    pub frames: Option<u64>,

    /// Render in software and write the last frame to this PNG
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Pace frames against the wall clock instead of a fixed step
    #[arg(long)]
    pub realtime: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("tilebrawl").chain(args.iter().copied()))
    }

    #[test]
    fn no_arguments_uses_defaults() {
        assert_eq!(parse(&[]).unwrap(), Options::default());
    }

    #[test]
    fn all_flags() {
        let options = parse(&[
            "--settings",
            "game.json",
            "--assets",
            "/srv/game",
            "--frames",
            "120",
            "--screenshot",
            "out.png",
            "--realtime",
        ])
        .unwrap();
        assert_eq!(options.settings, Some(PathBuf::from("game.json")));
        assert_eq!(options.assets, Some(PathBuf::from("/srv/game")));
        assert_eq!(options.frames, Some(120));
        assert_eq!(options.screenshot, Some(PathBuf::from("out.png")));
        assert!(options.realtime);
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(parse(&["--frames"]).is_err());
    }

    #[test]
    fn bad_frame_count_is_an_error() {
        let err = parse(&["--frames", "many"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = parse(&["--fullscreen"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_generated() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--screenshot"));
    }
}
