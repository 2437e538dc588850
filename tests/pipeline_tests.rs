//! End-to-end tests for the command pipeline.
//!
//! Drive `run_diff`, `run_merge` and `run_view` against the fixture files
//! and inspect what they write.

use std::path::{Path, PathBuf};
use swc_port_tools::cli::{run_diff, run_merge, run_view};
use swc_port_tools::config::{
    BehaviorConfig, DiffConfigBuilder, MergeConfig, OutputConfig, ParsingConfig, ViewConfig,
};
use swc_port_tools::parsers::parse_port_file;
use swc_port_tools::pipeline::exit_codes;
use swc_port_tools::reports::{ReportFormat, SummaryPosition};
use swc_port_tools::PortKey;
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn quiet_behavior() -> BehaviorConfig {
    BehaviorConfig {
        quiet: true,
        ..BehaviorConfig::default()
    }
}

// ============================================================================
// diff
// ============================================================================

mod diff_command {
    use super::*;

    #[test]
    fn test_diff_writes_csv_by_extension() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("diff.csv");
        let config = DiffConfigBuilder::new()
            .base_path(fixture_path("base.xml"))
            .candidate_path(fixture_path("candidate.xml"))
            .output_file(Some(out.clone()))
            .quiet(true)
            .build()
            .unwrap();

        assert_eq!(run_diff(config).unwrap(), exit_codes::SUCCESS);

        let csv = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "owner,name,change_kind,field,old_value,new_value");
        assert_eq!(lines[1], ",,SUMMARY,ADDED,,1");
        assert_eq!(lines[2], ",,SUMMARY,REMOVED,,1");
        assert_eq!(lines[3], ",,SUMMARY,MODIFIED,,1");
        assert_eq!(lines[4], ",,SUMMARY,UNCHANGED,,2");
        assert_eq!(lines[5], "Com,ComM_UserRequest,ADDED,,,");
    }

    #[test]
    fn test_diff_summary_at_bottom_only_changes() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("diff.csv");
        let config = DiffConfigBuilder::new()
            .base_path(fixture_path("base.xml"))
            .candidate_path(fixture_path("candidate.xml"))
            .output_file(Some(out.clone()))
            .summary_position(SummaryPosition::Bottom)
            .only_changes(true)
            .quiet(true)
            .build()
            .unwrap();

        run_diff(config).unwrap();

        let csv = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        // header + 3 changed rows + 4 summary rows
        assert_eq!(lines.len(), 8);
        assert!(!csv.contains(",UNCHANGED,,,"));
        assert_eq!(lines[7], ",,SUMMARY,UNCHANGED,,2");
    }

    #[test]
    fn test_diff_fail_on_change() {
        let tmp = TempDir::new().unwrap();
        let config = DiffConfigBuilder::new()
            .base_path(fixture_path("base.xml"))
            .candidate_path(fixture_path("candidate.xml"))
            .output_file(Some(tmp.path().join("diff.json")))
            .fail_on_change(true)
            .quiet(true)
            .build()
            .unwrap();

        assert_eq!(run_diff(config).unwrap(), exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn test_diff_merges_each_side() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("diff.json");
        let config = DiffConfigBuilder::new()
            .base_path(fixture_path("base.xml"))
            .base_path(fixture_path("rids.xml"))
            .candidate_path(fixture_path("candidate.xml"))
            .output_file(Some(out.clone()))
            .quiet(true)
            .build()
            .unwrap();

        run_diff(config).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["summary"]["added"], 1);
        assert_eq!(json["summary"]["removed"], 2);
        assert_eq!(json["summary"]["modified"], 0);
        assert_eq!(json["summary"]["unchanged"], 3);
        assert_eq!(json["metadata"]["base"]["paths"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_diff_restricted_to_swc() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("diag.json");
        let config = DiffConfigBuilder::new()
            .base_path(fixture_path("base.xml"))
            .candidate_path(fixture_path("candidate.xml"))
            .output_file(Some(out.clone()))
            .swc_filter(Some("Diag".to_string()))
            .quiet(true)
            .build()
            .unwrap();

        run_diff(config).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["metadata"]["title"], "SWC Port Diff: Diag");
        assert!(json["entries"]
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["owner"] == "Diag"));
    }

    #[test]
    fn test_diff_incomparable_inputs_fail() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("diff.csv");
        let config = DiffConfigBuilder::new()
            .base_path(fixture_path("base.xml"))
            .candidate_path(fixture_path("other-scheme.xml"))
            .output_file(Some(out.clone()))
            .quiet(true)
            .build()
            .unwrap();

        let err = run_diff(config).unwrap_err();
        assert!(format!("{err:#}").contains("Incomparable"));
        assert!(!out.exists());
    }

    #[test]
    fn test_diff_strict_and_lenient() {
        let tmp = TempDir::new().unwrap();
        let build = |lenient: bool| {
            DiffConfigBuilder::new()
                .base_path(fixture_path("malformed.xml"))
                .candidate_path(fixture_path("candidate.xml"))
                .output_file(Some(tmp.path().join("diff.csv")))
                .lenient(lenient)
                .quiet(true)
                .build()
                .unwrap()
        };

        assert!(run_diff(build(false)).is_err());
        assert_eq!(run_diff(build(true)).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_diff_missing_input() {
        let config = DiffConfigBuilder::new()
            .base_path(fixture_path("missing.xml"))
            .candidate_path(fixture_path("candidate.xml"))
            .quiet(true)
            .build()
            .unwrap();

        let err = run_diff(config).unwrap_err();
        assert!(format!("{err:#}").contains("missing.xml"));
    }
}

// ============================================================================
// merge
// ============================================================================

mod merge_command {
    use super::*;

    fn merge_config(out: PathBuf, fail_on_conflict: bool) -> MergeConfig {
        MergeConfig {
            paths: vec![fixture_path("base.xml"), fixture_path("rids.xml")],
            output: OutputConfig {
                file: Some(out),
                ..OutputConfig::default()
            },
            parsing: ParsingConfig::default(),
            behavior: BehaviorConfig {
                fail_on_conflict,
                ..quiet_behavior()
            },
        }
    }

    #[test]
    fn test_merge_snapshot_can_be_diffed() {
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("merged.json");

        assert_eq!(
            run_merge(merge_config(snapshot.clone(), false)).unwrap(),
            exit_codes::SUCCESS
        );

        let merged = parse_port_file(&snapshot).unwrap();
        assert_eq!(merged.len(), 5);
        assert!(merged.contains(&PortKey::new("Diag", "RoutineServices_F001")));

        let out = tmp.path().join("diff.json");
        let config = DiffConfigBuilder::new()
            .base_path(snapshot)
            .candidate_path(fixture_path("candidate.xml"))
            .output_file(Some(out.clone()))
            .quiet(true)
            .build()
            .unwrap();
        run_diff(config).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["summary"]["removed"], 2);
    }

    #[test]
    fn test_merge_fail_on_conflict() {
        let tmp = TempDir::new().unwrap();
        let code = run_merge(merge_config(tmp.path().join("merged.json"), true)).unwrap();
        assert_eq!(code, exit_codes::CONFLICTS_DETECTED);
    }

    #[test]
    fn test_merge_csv_output() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("merged.csv");
        run_merge(merge_config(out.clone(), false)).unwrap();

        let csv = std::fs::read_to_string(&out).unwrap();
        assert!(csv.starts_with("owner,name,direction,source_id\r\n"));
        assert!(csv.contains("Diag,DataServices_DID_F192,PROVIDED,0x0FD2\r\n"));
    }

    #[test]
    fn test_merge_needs_two_files() {
        let tmp = TempDir::new().unwrap();
        let mut config = merge_config(tmp.path().join("merged.json"), false);
        config.paths.truncate(1);
        assert!(run_merge(config).is_err());
    }
}

// ============================================================================
// view
// ============================================================================

mod view_command {
    use super::*;

    #[test]
    fn test_view_json_snapshot() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("ports.json");
        let config = ViewConfig {
            path: fixture_path("candidate.xml"),
            output: OutputConfig {
                file: Some(out.clone()),
                format: ReportFormat::Auto,
                ..OutputConfig::default()
            },
            parsing: ParsingConfig::default(),
            swc_filter: None,
            quiet: true,
        };

        assert_eq!(run_view(config).unwrap(), exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["label"], "candidate.xml");
        assert_eq!(json["identity_scheme"], "swc-name/port-name");
        assert_eq!(json["ports"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_view_unknown_swc_is_empty() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("ports.csv");
        let config = ViewConfig {
            path: fixture_path("candidate.xml"),
            output: OutputConfig {
                file: Some(out.clone()),
                ..OutputConfig::default()
            },
            parsing: ParsingConfig::default(),
            swc_filter: Some("EcuM".to_string()),
            quiet: true,
        };

        run_view(config).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "owner,name,direction,source_id\r\n"
        );
    }
}
