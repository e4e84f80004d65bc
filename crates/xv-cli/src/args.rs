//! Command-line arguments

use std::path::PathBuf;

use crate::error::CliError;

pub const USAGE: &str =
    "usage: xv <scene.ron> [--config <config.ron>] [--catalog] [--steps <n>] [--factor <f>]";

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// Scene description to load
    pub scene: PathBuf,
    /// Optional RON configuration
    pub config: Option<PathBuf>,
    /// Use the catalog palette when no config file is given
    pub catalog: bool,
    /// Number of intervals in the 0..=1 sweep
    pub steps: u32,
    /// Apply a single factor instead of sweeping
    pub factor: Option<f32>,
}

impl Args {
    /// Parse arguments (without the program name)
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut scene = None;
        let mut config = None;
        let mut catalog = false;
        let mut steps: u32 = 4;
        let mut factor = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => config = Some(PathBuf::from(value(&mut args, "--config")?)),
                "--catalog" => catalog = true,
                "--steps" => {
                    let raw = value(&mut args, "--steps")?;
                    steps = raw
                        .parse::<u32>()
                        .ok()
                        .filter(|&n| n > 0)
                        .ok_or_else(|| CliError::InvalidValue("--steps".into(), raw))?;
                }
                "--factor" => {
                    let raw = value(&mut args, "--factor")?;
                    let f: f32 = raw
                        .parse()
                        .map_err(|_| CliError::InvalidValue("--factor".into(), raw.clone()))?;
                    if !f.is_finite() {
                        return Err(CliError::InvalidValue("--factor".into(), raw));
                    }
                    factor = Some(f);
                }
                flag if flag.starts_with("--") => {
                    return Err(CliError::UnknownFlag(flag.to_string()));
                }
                path if scene.is_none() => scene = Some(PathBuf::from(path)),
                other => return Err(CliError::UnexpectedArgument(other.to_string())),
            }
        }

        Ok(Self {
            scene: scene.ok_or(CliError::MissingScene)?,
            config,
            catalog,
            steps,
            factor,
        })
    }

    /// Factors to apply, in order
    pub fn factors(&self) -> Vec<f32> {
        match self.factor {
            Some(f) => vec![f],
            None => (0..=self.steps)
                .map(|i| i as f32 / self.steps as f32)
                .collect(),
        }
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    args.next().ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, CliError> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["engine.ron"]).unwrap();
        assert_eq!(args.scene, PathBuf::from("engine.ron"));
        assert_eq!(args.config, None);
        assert!(!args.catalog);
        assert_eq!(args.factors(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "--config", "c.ron", "--catalog", "--steps", "2", "engine.ron", "--factor", "0.5",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.ron")));
        assert!(args.catalog);
        assert_eq!(args.steps, 2);
        assert_eq!(args.factors(), vec![0.5]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse(&[]), Err(CliError::MissingScene)));
        assert!(matches!(parse(&["a.ron", "--steps"]), Err(CliError::MissingValue(_))));
        assert!(matches!(parse(&["a.ron", "--steps", "0"]), Err(CliError::InvalidValue(..))));
        assert!(matches!(parse(&["a.ron", "--factor", "x"]), Err(CliError::InvalidValue(..))));
        assert!(matches!(parse(&["a.ron", "--verbose"]), Err(CliError::UnknownFlag(_))));
        assert!(matches!(parse(&["a.ron", "b.ron"]), Err(CliError::UnexpectedArgument(_))));
    }
}
