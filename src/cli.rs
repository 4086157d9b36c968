use clap::{Parser, Subcommand};

/// Browse color palettes loaded page by page from a backend.
#[derive(Parser, Debug)]
#[command(name = "swatchbook", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the paginated color list over HTTP
    Serve {
        /// Port to listen on (defaults to $PORT, then 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Open the interactive palette gallery
    Browse {
        /// Base URL of the colors backend (defaults to $GALLERY_API_URL)
        #[arg(long)]
        api_url: Option<String>,

        /// Colors requested per page
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,

        /// Colors grouped into one palette
        #[arg(short = 's', long, value_parser = clap::value_parser!(u64).range(1..))]
        palette_size: Option<u64>,

        /// Browse the built-in colors without a backend
        #[arg(long, conflicts_with = "api_url")]
        demo: bool,
    },

    /// Print every row of the hosted feedback table as JSON
    Feedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_port() {
        let args = Args::try_parse_from(["swatchbook", "serve", "--port", "4000"]).unwrap();
        assert_eq!(args.command, Command::Serve { port: Some(4000) });
    }

    #[test]
    fn parses_browse_options() {
        let args = Args::try_parse_from([
            "swatchbook",
            "browse",
            "--api-url",
            "http://127.0.0.1:3000",
            "-l",
            "30",
            "-s",
            "6",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Browse {
                api_url: Some("http://127.0.0.1:3000".into()),
                limit: Some(30),
                palette_size: Some(6),
                demo: false,
            }
        );
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(Args::try_parse_from(["swatchbook", "browse", "--limit", "0"]).is_err());
    }

    #[test]
    fn demo_conflicts_with_api_url() {
        assert!(Args::try_parse_from([
            "swatchbook",
            "browse",
            "--demo",
            "--api-url",
            "http://x"
        ])
        .is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["swatchbook"]).is_err());
    }
}
