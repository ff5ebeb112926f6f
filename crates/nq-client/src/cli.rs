use std::fmt;

pub const DEFAULT_MEM_MB: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientArgs {
    pub basedir: String,
    pub cachedir: String,
    pub mem_mb: usize,
    pub dedicated: bool,
    pub nostdout: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Default for ClientArgs {
    fn default() -> Self {
        Self {
            basedir: ".".to_string(),
            cachedir: ".".to_string(),
            mem_mb: DEFAULT_MEM_MB,
            dedicated: false,
            nostdout: false,
            width: None,
            height: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Run(ClientArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    MissingValue(String),
    InvalidValue(String),
    InvalidFlag(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingValue(flag) => write!(f, "missing value for {}", flag),
            CliError::InvalidValue(value) => write!(f, "invalid value: {}", value),
            CliError::InvalidFlag(flag) => write!(f, "unknown flag: {}", flag),
        }
    }
}

impl std::error::Error for CliError {}

pub fn usage() -> &'static str {
    "Usage: nq-client [options]\n\
Options:\n\
  --basedir <path>    Game data directory (default .)\n\
  --cachedir <path>   Cache directory (default .)\n\
  --mem <MB>          Hunk size in megabytes (default 16)\n\
  --width <pixels>    Window width (default 640)\n\
  --height <pixels>   Window height (default 480)\n\
  -dedicated          Run without video, audio, or input\n\
  -nostdout           Suppress console logging\n\
  -h, --help          Show this help\n"
}

pub fn parse_args<I, S>(args: I) -> Result<CliAction, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut parsed = ClientArgs::default();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "--basedir" => {
                parsed.basedir = iter
                    .next()
                    .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
            }
            "--cachedir" => {
                parsed.cachedir = iter
                    .next()
                    .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
            }
            "--mem" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                parsed.mem_mb = value
                    .parse::<usize>()
                    .ok()
                    .filter(|mb| *mb > 0)
                    .ok_or(CliError::InvalidValue(value))?;
            }
            "--width" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                parsed.width = Some(
                    value
                        .parse::<u32>()
                        .ok()
                        .filter(|px| *px > 0)
                        .ok_or(CliError::InvalidValue(value))?,
                );
            }
            "--height" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                parsed.height = Some(
                    value
                        .parse::<u32>()
                        .ok()
                        .filter(|px| *px > 0)
                        .ok_or(CliError::InvalidValue(value))?,
                );
            }
            "-dedicated" | "--dedicated" => parsed.dedicated = true,
            "-nostdout" | "--nostdout" => parsed.nostdout = true,
            _ => return Err(CliError::InvalidFlag(arg)),
        }
    }

    Ok(CliAction::Run(parsed))
}
