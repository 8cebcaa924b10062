use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(short, long, value_name = "FLOAT", help = "Tick rate, i.e. number of simulation ticks per second", default_value_t = 100.0)]
    pub tick_rate: f64,

    #[arg(short, long, value_name = "FLOAT", help = "Frame rate, i.e. number of frames per second", default_value_t = 60.0)]
    pub frame_rate: f64,

    #[arg(short, long, value_name = "SEED", help = "Seed for the pipe gaps, random when omitted")]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["flappy-rs"]);
        assert_eq!(cli.tick_rate, 100.0);
        assert_eq!(cli.frame_rate, 60.0);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["flappy-rs", "--tick-rate", "50", "-f", "30", "--seed", "7"]);
        assert_eq!(cli.tick_rate, 50.0);
        assert_eq!(cli.frame_rate, 30.0);
        assert_eq!(cli.seed, Some(7));
    }
}
