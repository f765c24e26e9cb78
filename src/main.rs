use clap::Parser;
use std::path::PathBuf;

/// Inspect and normalize the subtitle timeline stored next to a media file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media file whose `.titler` timeline is opened
    media_path: PathBuf,

    /// Normalize timing before printing and save the result
    #[arg(long)]
    fix: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(error) = titler_lib::run(&args.media_path, args.fix) {
        eprintln!("{} ({})", error, error.code());
        if let Some(suggestion) = error.suggestion() {
            eprintln!("hint: {suggestion}");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_media_path_and_fix_flag() {
        let args = Args::try_parse_from(["titler", "clip.mkv", "--fix"]).unwrap();
        assert_eq!(args.media_path, PathBuf::from("clip.mkv"));
        assert!(args.fix);
    }

    #[test]
    fn help_is_not_taken_for_a_media_path() {
        let error = Args::try_parse_from(["titler", "--help"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn media_path_is_required() {
        let error = Args::try_parse_from(["titler"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
