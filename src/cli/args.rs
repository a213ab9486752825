//! Command line parsing
//!
//! `rax-ftps-client <operation> <location> [<location>]`

use clap::{Arg, ArgAction, Command};

use crate::cli::location::{Location, RemoteLocation};
use crate::error::UsageError;
use crate::operation::{Operation, TransferDirection};

const ARG_OPERATION: &str = "operation";
const ARG_PARAMS: &str = "params";

pub const VERBS: [&str; 6] = ["ls", "rm", "rmdir", "mkdir", "cp", "mv"];

/// A validated request: where to connect and what to do there.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub remote: RemoteLocation,
    pub operation: Operation,
}

pub fn build_cli_args() -> Command {
    Command::new("rax-ftps-client")
        .about("FTP over explicit TLS client")
        .arg(
            Arg::new(ARG_OPERATION)
                .help("Operation to perform")
                .num_args(1)
                .value_name("OPERATION")
                .value_parser(VERBS)
                .required(true),
        )
        .arg(
            Arg::new(ARG_PARAMS)
                .help("One remote location, or a source and a destination of which exactly one is remote")
                .num_args(1..=2)
                .value_name("LOCATION")
                .action(ArgAction::Append)
                .required(true),
        )
}

/// Parses the process arguments. Exits with a usage message on clap errors.
pub fn parse_args(default_port: u16) -> Result<Invocation, UsageError> {
    let matches = build_cli_args().get_matches();
    // Both arguments are required, clap guarantees they are present.
    let verb = matches
        .get_one::<String>(ARG_OPERATION)
        .cloned()
        .unwrap_or_default();
    let params: Vec<String> = matches
        .get_many::<String>(ARG_PARAMS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    parse_invocation(&verb, &params, default_port)
}

/// Validates a verb and its locations.
///
/// `ls`, `rm`, `rmdir` and `mkdir` take exactly one remote location;
/// `cp` and `mv` take a source and a destination, exactly one remote.
pub fn parse_invocation(
    verb: &str,
    params: &[String],
    default_port: u16,
) -> Result<Invocation, UsageError> {
    match verb {
        "ls" | "rm" | "rmdir" | "mkdir" => {
            expect_count(verb, params, 1)?;
            let remote = match Location::parse(&params[0], default_port)? {
                Location::Remote(remote) => remote,
                Location::Local(_) => {
                    return Err(UsageError::RemoteLocationRequired(params[0].clone()));
                }
            };
            let path = remote.path.clone();
            let operation = match verb {
                "ls" => Operation::List { path },
                "rm" => Operation::RemoveFile { path },
                "rmdir" => Operation::RemoveDirectory { path },
                _ => Operation::MakeDirectory { path },
            };
            Ok(Invocation { remote, operation })
        }
        "cp" | "mv" => {
            expect_count(verb, params, 2)?;
            let source = Location::parse(&params[0], default_port)?;
            let destination = Location::parse(&params[1], default_port)?;
            let (remote, direction) = match (source, destination) {
                (Location::Remote(remote), Location::Local(local)) => {
                    let direction = TransferDirection::Download {
                        remote_path: remote.path.clone(),
                        local_path: local,
                    };
                    (remote, direction)
                }
                (Location::Local(local), Location::Remote(remote)) => {
                    let direction = TransferDirection::Upload {
                        local_path: local,
                        remote_path: remote.path.clone(),
                    };
                    (remote, direction)
                }
                _ => return Err(UsageError::ExactlyOneRemote),
            };
            let operation = if verb == "cp" {
                Operation::Copy(direction)
            } else {
                Operation::Move(direction)
            };
            Ok(Invocation { remote, operation })
        }
        other => Err(UsageError::InvalidVerb(other.to_string())),
    }
}

fn expect_count(verb: &str, params: &[String], expected: usize) -> Result<(), UsageError> {
    if params.len() != expected {
        return Err(UsageError::WrongLocationCount {
            verb: verb.to_string(),
            expected,
            got: params.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_location_verbs() {
        let inv = parse_invocation("ls", &args(&["ftps://u:p@host/dir"]), 21).unwrap();
        assert_eq!(inv.operation, Operation::List { path: "/dir".into() });
        assert_eq!(inv.remote.host, "host");

        let inv = parse_invocation("rm", &args(&["ftps://u:p@host/a.txt"]), 21).unwrap();
        assert_eq!(inv.operation, Operation::RemoveFile { path: "/a.txt".into() });

        let inv = parse_invocation("rmdir", &args(&["ftps://u:p@host/d"]), 21).unwrap();
        assert_eq!(inv.operation, Operation::RemoveDirectory { path: "/d".into() });

        let inv = parse_invocation("mkdir", &args(&["ftps://u:p@host/d"]), 21).unwrap();
        assert_eq!(inv.operation, Operation::MakeDirectory { path: "/d".into() });
    }

    #[test]
    fn test_single_location_must_be_remote() {
        let err = parse_invocation("ls", &args(&["local/dir"]), 21).unwrap_err();
        assert_eq!(err, UsageError::RemoteLocationRequired("local/dir".into()));
    }

    #[test]
    fn test_location_counts() {
        let err = parse_invocation("rm", &args(&["ftps://u:p@h/a", "b"]), 21).unwrap_err();
        assert!(matches!(err, UsageError::WrongLocationCount { expected: 1, got: 2, .. }));

        let err = parse_invocation("cp", &args(&["ftps://u:p@h/a"]), 21).unwrap_err();
        assert!(matches!(err, UsageError::WrongLocationCount { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_copy_directions() {
        let inv = parse_invocation("cp", &args(&["ftps://u:p@h:2121/r.bin", "l.bin"]), 21).unwrap();
        assert_eq!(inv.remote.port, 2121);
        assert_eq!(
            inv.operation,
            Operation::Copy(TransferDirection::Download {
                remote_path: "/r.bin".into(),
                local_path: PathBuf::from("l.bin"),
            })
        );

        let inv = parse_invocation("mv", &args(&["l.bin", "ftps://u:p@h/r.bin"]), 21).unwrap();
        assert_eq!(
            inv.operation,
            Operation::Move(TransferDirection::Upload {
                local_path: PathBuf::from("l.bin"),
                remote_path: "/r.bin".into(),
            })
        );
    }

    #[test]
    fn test_exactly_one_remote_for_transfers() {
        let err = parse_invocation("cp", &args(&["a", "b"]), 21).unwrap_err();
        assert_eq!(err, UsageError::ExactlyOneRemote);

        let err =
            parse_invocation("mv", &args(&["ftps://u:p@h/a", "ftps://u:p@h/b"]), 21).unwrap_err();
        assert_eq!(err, UsageError::ExactlyOneRemote);
    }

    #[test]
    fn test_unknown_verb() {
        let err = parse_invocation("get", &args(&["ftps://u:p@h/a"]), 21).unwrap_err();
        assert_eq!(err, UsageError::InvalidVerb("get".into()));
    }

    #[test]
    fn test_clap_definition() {
        build_cli_args().debug_assert();
        let matches = build_cli_args()
            .try_get_matches_from(["rax-ftps-client", "cp", "ftps://u:p@h/a", "b"])
            .unwrap();
        let params: Vec<&String> = matches.get_many::<String>(ARG_PARAMS).unwrap().collect();
        assert_eq!(params.len(), 2);

        assert!(build_cli_args()
            .try_get_matches_from(["rax-ftps-client", "get", "ftps://u:p@h/a"])
            .is_err());
    }
}
