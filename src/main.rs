//! Headless auto-play runner (default binary).
//!
//! Seeds an engine, hands it to the placement agent, and prints each
//! committed board to stdout. `--quiet` suppresses the frames and
//! leaves only the final summary.

use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use auto_tetris::agent::{Agent, Weights};
use auto_tetris::core::{Engine, GameConfig, PlayfieldUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunOptions {
    seed: u32,
    pieces: u32,
    config_path: Option<String>,
    quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            pieces: 100,
            config_path: None,
            quiet: false,
        }
    }
}

/// On-disk settings: game geometry and timing plus agent weights,
/// every field optional.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct DriverConfig {
    game: GameConfig,
    weights: Weights,
}

fn parse_args(args: &[String]) -> Result<RunOptions> {
    let mut options = RunOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                options.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--pieces" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --pieces"))?;
                options.pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --pieces value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                options.config_path = Some(v.clone());
            }
            "--quiet" => {
                options.quiet = true;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(options)
}

fn load_config(path: Option<&str>) -> Result<DriverConfig> {
    let Some(path) = path else {
        return Ok(DriverConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    let config: DriverConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path))?;
    Ok(config)
}

fn render_frame(update: &PlayfieldUpdate) -> String {
    let width = update.visible_rows.first().map_or(0, Vec::len);
    let mut out = String::with_capacity((width + 3) * (update.visible_rows.len() + 1));
    for row in update.visible_rows.iter().rev() {
        out.push('|');
        for cell in row {
            out.push(cell.map_or('.', |kind| kind.as_char()));
        }
        out.push('|');
        out.push('\n');
    }
    out.push('+');
    for _ in 0..width {
        out.push('-');
    }
    out.push('+');
    out
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;
    let config = load_config(options.config_path.as_deref())?;

    let engine = Engine::new(config.game, options.seed);
    let mut agent = Agent::new(engine, config.weights);

    if !options.quiet {
        agent.engine_mut().bind_playfield_updated(|update| {
            println!("{}", render_frame(update));
        });
        agent.engine_mut().bind_lines_cleared(|count| {
            println!("cleared {} line(s)", count);
        });
        agent.engine_mut().bind_game_over(|| {
            println!("game over");
        });
    }

    let summary = agent.play(options.pieces);
    println!(
        "seed {}: placed {} piece(s), cleared {} line(s){}",
        options.seed,
        summary.pieces_placed,
        summary.lines_cleared,
        if summary.topped_out {
            ", topped out"
        } else {
            ""
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn test_parse_args_full() {
        let options =
            parse_args(&args(&["--seed", "42", "--pieces", "10", "--quiet"])).unwrap();
        assert_eq!(options.seed, 42);
        assert_eq!(options.pieces, 10);
        assert!(options.quiet);
    }

    #[test]
    fn test_parse_args_rejects_unknown() {
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "x"])).is_err());
    }

    #[test]
    fn test_driver_config_accepts_partial_json() {
        let config: DriverConfig =
            serde_json::from_str(r#"{"weights": {"total_holes": 2.5}}"#).unwrap();
        assert_eq!(config.game, GameConfig::default());
        assert!((config.weights.total_holes - 2.5).abs() < 1e-9);
        assert!((config.weights.aggregated_height - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_config_roundtrips_through_json() {
        let default = DriverConfig::default();
        let json = serde_json::to_string(&default).unwrap();
        let back: DriverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, default);
        assert_eq!(back.game, GameConfig::default());
    }

    #[test]
    fn test_render_frame_shape() {
        let update = PlayfieldUpdate {
            visible_rows: vec![vec![None; 4]; 3],
            falling_piece_shape: auto_tetris::types::PieceKind::T,
            falling_piece_cells: [(1, 1); 4],
            ghost_cells: [(1, 1); 4],
        };
        let frame = render_frame(&update);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "|....|");
        assert_eq!(lines[3], "+----+");
    }
}
