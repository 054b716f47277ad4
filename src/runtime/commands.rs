//! Line commands read from stdin.

use std::io::BufRead;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::library::{ParseDurationError, TrackId, parse_duration};

const DEFAULT_SCRUB_SECS: i64 = 10;

pub const HELP: &str = "\
commands:
  play [id]          play a track (toggle when no id)
  toggle             play/pause
  next | prev        skip forward/back
  seek <secs|m:ss>   jump to a position
  forward [secs]     scrub forward (default 10)
  back [secs]        scrub back (default 10)
  volume <0-100>     set volume
  add <path>         import a file or directory
  remove <id>        remove a track
  list               show the track list
  search <text>      filter by title or artist
  playlists          show playlists
  playlist new <name> [| description]
                     create a playlist
  status             show what is playing
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCmd {
    Play(TrackId),
    Toggle,
    Next,
    Prev,
    Seek(Duration),
    /// Relative seek in seconds, positive or negative.
    SeekBy(i64),
    Volume(u8),
    Add(PathBuf),
    Remove(TrackId),
    List,
    Search(String),
    Playlists,
    NewPlaylist { name: String, description: String },
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("not a number: {0:?}")]
    InvalidNumber(String),
    #[error("volume must be 0-100, got {0}")]
    VolumeOutOfRange(u64),
    #[error(transparent)]
    InvalidTime(#[from] ParseDurationError),
}

fn number<T: FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn required<'a>(arg: &'a str, verb: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(verb))
    } else {
        Ok(arg)
    }
}

fn scrub_secs(arg: &str) -> Result<i64, CommandError> {
    if arg.is_empty() {
        Ok(DEFAULT_SCRUB_SECS)
    } else {
        number(arg)
    }
}

/// `new <name> [| description]`
fn parse_playlist(arg: &str) -> Result<ControlCmd, CommandError> {
    let (sub, rest) = arg
        .split_once(char::is_whitespace)
        .map(|(s, r)| (s, r.trim()))
        .unwrap_or((arg, ""));
    if !sub.eq_ignore_ascii_case("new") {
        return Err(CommandError::Unknown(format!("playlist {sub}")));
    }
    let rest = required(rest, "playlist new")?;
    let (name, description) = rest.split_once('|').unwrap_or((rest, ""));
    Ok(ControlCmd::NewPlaylist {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
    })
}

impl FromStr for ControlCmd {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = line
            .split_once(char::is_whitespace)
            .map(|(v, a)| (v, a.trim()))
            .unwrap_or((line, ""));

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "play" if arg.is_empty() => Self::Toggle,
            "play" => Self::Play(TrackId(number(arg)?)),
            "toggle" | "pause" | "p" => Self::Toggle,
            "next" | "n" => Self::Next,
            "prev" | "previous" => Self::Prev,
            "seek" => {
                let arg = required(arg, "seek")?;
                if arg.contains(':') {
                    Self::Seek(parse_duration(arg)?)
                } else {
                    Self::Seek(Duration::from_secs(number(arg)?))
                }
            }
            "forward" | "ff" => Self::SeekBy(scrub_secs(arg)?),
            "back" | "rw" => Self::SeekBy(
                scrub_secs(arg)?
                    .checked_neg()
                    .ok_or_else(|| CommandError::InvalidNumber(arg.to_string()))?,
            ),
            "volume" | "vol" => {
                let v: u64 = number(required(arg, "volume")?)?;
                let v = u8::try_from(v)
                    .ok()
                    .filter(|v| *v <= 100)
                    .ok_or(CommandError::VolumeOutOfRange(v))?;
                Self::Volume(v)
            }
            "add" => Self::Add(PathBuf::from(required(arg, "add")?)),
            "remove" | "rm" => Self::Remove(TrackId(number(required(arg, "remove")?)?)),
            "list" | "ls" => Self::List,
            "search" | "find" => Self::Search(arg.to_string()),
            "playlists" | "pl" => Self::Playlists,
            "playlist" => parse_playlist(required(arg, "playlist")?)?,
            "status" | "s" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };
        Ok(cmd)
    }
}

/// Forward stdin lines to `tx` until stdin closes or the receiver is dropped.
pub fn spawn_stdin_reader(tx: Sender<String>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<ControlCmd, CommandError> {
        s.parse()
    }

    #[test]
    fn parses_transport_commands() {
        assert_eq!(parse("play 3"), Ok(ControlCmd::Play(TrackId(3))));
        assert_eq!(parse("play"), Ok(ControlCmd::Toggle));
        assert_eq!(parse("  PAUSE "), Ok(ControlCmd::Toggle));
        assert_eq!(parse("next"), Ok(ControlCmd::Next));
        assert_eq!(parse("previous"), Ok(ControlCmd::Prev));
        assert_eq!(parse("q"), Ok(ControlCmd::Quit));
    }

    #[test]
    fn parses_seek_in_seconds_or_minutes() {
        assert_eq!(
            parse("seek 90"),
            Ok(ControlCmd::Seek(Duration::from_secs(90)))
        );
        assert_eq!(
            parse("seek 1:30"),
            Ok(ControlCmd::Seek(Duration::from_secs(90)))
        );
        assert_eq!(parse("seek"), Err(CommandError::MissingArgument("seek")));
        assert!(matches!(
            parse("seek 1:99"),
            Err(CommandError::InvalidTime(_))
        ));
    }

    #[test]
    fn scrubbing_defaults_to_ten_seconds() {
        assert_eq!(parse("forward"), Ok(ControlCmd::SeekBy(10)));
        assert_eq!(parse("forward 30"), Ok(ControlCmd::SeekBy(30)));
        assert_eq!(parse("back"), Ok(ControlCmd::SeekBy(-10)));
        assert_eq!(parse("rw 5"), Ok(ControlCmd::SeekBy(-5)));
        assert_eq!(parse("back -5"), Ok(ControlCmd::SeekBy(5)));
    }

    #[test]
    fn parses_playlist_commands() {
        assert_eq!(parse("playlists"), Ok(ControlCmd::Playlists));
        assert_eq!(
            parse("playlist new Late Night | quiet ones"),
            Ok(ControlCmd::NewPlaylist {
                name: "Late Night".into(),
                description: "quiet ones".into(),
            })
        );
        assert_eq!(
            parse("playlist NEW Gym"),
            Ok(ControlCmd::NewPlaylist {
                name: "Gym".into(),
                description: String::new(),
            })
        );
        assert_eq!(
            parse("playlist new"),
            Err(CommandError::MissingArgument("playlist new"))
        );
        assert_eq!(
            parse("playlist drop 3"),
            Err(CommandError::Unknown("playlist drop".into()))
        );
    }

    #[test]
    fn out_of_range_times_are_rejected() {
        assert_eq!(
            parse("back -9223372036854775808"),
            Err(CommandError::InvalidNumber("-9223372036854775808".into()))
        );
        assert!(matches!(
            parse("seek 999999999999999999:00"),
            Err(CommandError::InvalidTime(ParseDurationError::Malformed(_)))
        ));
    }

    #[test]
    fn volume_is_range_checked() {
        assert_eq!(parse("volume 0"), Ok(ControlCmd::Volume(0)));
        assert_eq!(parse("vol 100"), Ok(ControlCmd::Volume(100)));
        assert_eq!(
            parse("volume 101"),
            Err(CommandError::VolumeOutOfRange(101))
        );
        assert_eq!(
            parse("volume 9000"),
            Err(CommandError::VolumeOutOfRange(9000))
        );
        assert_eq!(
            parse("volume loud"),
            Err(CommandError::InvalidNumber("loud".into()))
        );
    }

    #[test]
    fn parses_list_management() {
        assert_eq!(
            parse("add /music/My Album"),
            Ok(ControlCmd::Add(PathBuf::from("/music/My Album")))
        );
        assert_eq!(parse("rm 4"), Ok(ControlCmd::Remove(TrackId(4))));
        assert_eq!(parse("list"), Ok(ControlCmd::List));
        assert_eq!(
            parse("search neon nights"),
            Ok(ControlCmd::Search("neon nights".into()))
        );
        assert_eq!(parse("search"), Ok(ControlCmd::Search(String::new())));
    }

    #[test]
    fn rejects_unknown_and_incomplete_commands() {
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(parse(""), Err(CommandError::Unknown(String::new())));
        assert_eq!(parse("add"), Err(CommandError::MissingArgument("add")));
        assert_eq!(
            parse("play x"),
            Err(CommandError::InvalidNumber("x".into()))
        );
    }
}
