//! Tests for validated configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::Address;
use crate::command::ValidationError;

use super::ConfigError;
use super::defaults;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{Target, ValidatedConfig};

const URL: &str = "http://localhost:9990/management";

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["elytron-ops"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

fn live_headers(config: &ValidatedConfig) -> &http::HeaderMap {
    match &config.target {
        Target::Live { headers, .. } => headers,
        Target::Offline { .. } => panic!("expected live target"),
    }
}

mod target {
    use super::*;

    #[test]
    fn missing_target_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "target",
                ..
            })
        ));
    }

    #[test]
    fn url_from_cli_selects_live() {
        let config = ValidatedConfig::from_raw(&cli(&["--url", URL]), None).unwrap();

        match config.target {
            Target::Live { url, .. } => assert_eq!(url.as_str(), URL),
            Target::Offline { .. } => panic!("expected live target"),
        }
    }

    #[test]
    fn document_from_toml_selects_offline() {
        let toml = toml(
            r#"
            [target]
            document = "standalone.json"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(toml)).unwrap();

        assert_eq!(
            config.target,
            Target::Offline {
                document: PathBuf::from("standalone.json")
            }
        );
    }

    #[test]
    fn cli_target_replaces_toml_target() {
        let toml = toml(&format!(
            r#"
            [target]
            url = "{URL}"
        "#
        ));

        let config =
            ValidatedConfig::from_raw(&cli(&["--document", "offline.json"]), Some(toml)).unwrap();

        assert!(matches!(config.target, Target::Offline { .. }));
    }

    #[test]
    fn both_targets_on_cli_conflict() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--url", URL, "--document", "doc.json"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::ConflictingTarget {
                source_name: "command line"
            })
        ));
    }

    #[test]
    fn both_targets_in_toml_conflict() {
        let toml = toml(&format!(
            r#"
            [target]
            url = "{URL}"
            document = "doc.json"
        "#
        ));

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(toml));

        assert!(matches!(
            result,
            Err(ConfigError::ConflictingTarget {
                source_name: "config file"
            })
        ));
    }

    #[test]
    fn invalid_url_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--url", "not a url"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--url", "ftp://localhost/"]), None);

        match result {
            Err(ConfigError::InvalidUrl { reason, .. }) => assert!(reason.contains("ftp")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

mod headers {
    use super::*;

    #[test]
    fn cli_headers_in_both_formats() {
        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--url",
                URL,
                "--header",
                "X-Api-Key=secret",
                "--header",
                "X-Trace: abc",
            ]),
            None,
        )
        .unwrap();

        let headers = live_headers(&config);
        assert_eq!(headers["x-api-key"], "secret");
        assert_eq!(headers["x-trace"], "abc");
    }

    #[test]
    fn cli_header_overrides_toml_header() {
        let toml = toml(
            r#"
            [target.headers]
            X-Api-Key = "from-toml"
            X-Other = "kept"
        "#,
        );

        let config = ValidatedConfig::from_raw(
            &cli(&["--url", URL, "--header", "X-Api-Key=from-cli"]),
            Some(toml),
        )
        .unwrap();

        let headers = live_headers(&config);
        assert_eq!(headers["x-api-key"], "from-cli");
        assert_eq!(headers["x-other"], "kept");
    }

    #[test]
    fn bearer_sets_authorization() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--url", URL, "--bearer", "token123"]), None)
                .unwrap();

        assert_eq!(
            live_headers(&config)[http::header::AUTHORIZATION],
            "Bearer token123"
        );
    }

    #[test]
    fn cli_bearer_overrides_toml_bearer() {
        let toml = toml(
            r#"
            [target]
            bearer = "toml-token"
        "#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--url", URL, "--bearer", "cli-token"]), Some(toml))
                .unwrap();

        assert_eq!(
            live_headers(&config)[http::header::AUTHORIZATION],
            "Bearer cli-token"
        );
    }

    #[test]
    fn header_without_separator_is_rejected() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--url", URL, "--header", "NoSeparator"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--url", URL, "--header", "Bad Name=value"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidHeaderName { .. })));
    }

    #[test]
    fn headers_are_ignored_for_offline_target() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--document", "doc.json", "--header", "NoSeparator"]),
            None,
        )
        .unwrap();

        assert!(matches!(config.target, Target::Offline { .. }));
    }
}

mod reload {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = ValidatedConfig::from_raw(&cli(&["--url", URL]), None).unwrap();

        assert_eq!(config.reload.timeout, defaults::reload_timeout());
        assert_eq!(config.reload.poll_interval, defaults::reload_poll_interval());
        assert_eq!(config.reload.timeout, Duration::from_secs(60));
    }

    #[test]
    fn cli_timeout_overrides_toml() {
        let toml = toml(
            r"
            [reload]
            timeout = 30
            poll_interval = 2
        ",
        );

        let config = ValidatedConfig::from_raw(
            &cli(&["--url", URL, "--reload-timeout", "90"]),
            Some(toml),
        )
        .unwrap();

        assert_eq!(config.reload.timeout, Duration::from_secs(90));
        assert_eq!(config.reload.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result =
            ValidatedConfig::from_raw(&cli(&["--url", URL, "--reload-timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "reload.timeout",
                ..
            })
        ));
    }

    #[test]
    fn poll_interval_longer_than_timeout_is_rejected() {
        let toml = toml(
            r"
            [reload]
            timeout = 5
            poll_interval = 10
        ",
        );

        let result = ValidatedConfig::from_raw(&cli(&["--url", URL]), Some(toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "reload.poll_interval",
                ..
            })
        ));
    }
}

mod commands {
    use super::*;

    #[test]
    fn commands_are_built_in_order() {
        let toml = toml(
            r#"
            [[command]]
            kind = "filesystem-realm"
            name = "fs"
            path = "fs-realm"

            [[command]]
            kind = "x500-attribute-principal-decoder"
            name = "cn"
            oid = "2.5.4.3"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--document", "doc.json"]), Some(toml))
            .unwrap();

        let kinds: Vec<_> = config.commands.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, ["filesystem-realm", "x500-attribute-principal-decoder"]);
    }

    #[test]
    fn invalid_command_reports_position_and_kind() {
        let toml = toml(
            r#"
            [[command]]
            kind = "filesystem-realm"
            name = "fs"
            path = "fs-realm"

            [[command]]
            kind = "credential-store"
            name = "store"
            uri = "file:///tmp/store.jceks"
            credential-reference = { clear-text = "secret" }
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&["--url", URL]), Some(toml));

        match result {
            Err(ConfigError::InvalidCommand {
                index,
                kind,
                source,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(kind, "credential-store");
                assert!(matches!(source, ValidationError::MissingPrefix { field: "uri", .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

mod query {
    use super::*;

    #[test]
    fn query_is_parsed() {
        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--url",
                URL,
                "query",
                "--address",
                "/subsystem=elytron/key-store=ks",
                "--attribute",
                "path",
            ]),
            None,
        )
        .unwrap();

        let query = config.query.unwrap();
        assert_eq!(
            query.address,
            Address::subsystem("elytron").and("key-store", "ks")
        );
        assert_eq!(query.attribute, "path");
    }

    #[test]
    fn query_against_document_is_rejected() {
        let result = ValidatedConfig::from_raw(
            &cli(&[
                "--document",
                "doc.json",
                "query",
                "--address",
                "/subsystem=elytron",
                "--attribute",
                "x",
            ]),
            None,
        );

        assert!(matches!(
            result,
            Err(ConfigError::LiveOnly { operation: "query" })
        ));
    }

    #[test]
    fn malformed_address_is_rejected() {
        let result = ValidatedConfig::from_raw(
            &cli(&["--url", URL, "query", "--address", "elytron", "--attribute", "x"]),
            None,
        );

        assert!(matches!(result, Err(ConfigError::InvalidAddress(_))));
    }
}

mod load {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [target]
            document = "standalone.json"

            [[command]]
            kind = "filesystem-realm"
            name = "fs"
            path = "fs-realm"
        "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path])).unwrap();

        assert_eq!(config.commands.len(), 1);
        assert!(matches!(config.target, Target::Offline { .. }));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let result = ValidatedConfig::load(&cli(&["--config", "/nonexistent/batch.toml"]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn write_default_config_creates_parsable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.toml");

        super::super::validated::write_default_config(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(TomlConfig::parse(&written).is_ok());
    }
}
